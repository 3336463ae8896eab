//! Interactive component views.
//!
//! Provides traits and utilities for building interactive UI components.

use std::str::FromStr;

use poise::serenity_prelude::ComponentInteraction;
use poise::serenity_prelude::CreateComponent;

pub mod pagination;

/// Trait for types that can create Discord UI components.
pub trait ViewProvider<'a, T = CreateComponent<'a>> {
    /// Creates the components for this view.
    fn create(&self) -> Vec<T>;
}

/// Trait for views that handle component interactions.
#[async_trait::async_trait]
pub trait InteractableComponentView<T>: for<'a> ViewProvider<'a>
where
    T: Action,
{
    /// Handles an interaction and returns the action if recognized.
    async fn handle(&mut self, interaction: &ComponentInteraction) -> Option<T>;
}

/// Trait for action enums used in interactive views.
pub trait Action: FromStr + Send {
    /// Returns the string representation of this action.
    fn as_str(&self) -> &'static str;
}

#[macro_export]
macro_rules! custom_id_enum {
    ($name:ident { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)*
        }

        impl $crate::bot::views::Action for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(Self::$variant),)*
                    _ => Err(()),
                }
            }
        }
    };
}
