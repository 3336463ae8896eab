//! Pagination component for Discord views.

use std::str::FromStr;

use poise::serenity_prelude::ButtonStyle;
use poise::serenity_prelude::ComponentInteraction;
use poise::serenity_prelude::CreateActionRow;
use poise::serenity_prelude::CreateButton;
use poise::serenity_prelude::CreateComponent;

use crate::bot::views::Action;
use crate::bot::views::InteractableComponentView;
use crate::bot::views::ViewProvider;
use crate::custom_id_enum;

/// Model for tracking pagination state.
///
/// Prev/next wrap around: stepping back from the first page lands on the
/// last page, and stepping forward from the last page lands on the first.
pub struct PaginationModel {
    pub current_page: u32,
    pub pages: u32,
    pub per_page: u32,
}

impl PaginationModel {
    /// Creates a new pagination model with the given parameters.
    pub fn new(pages: u32, per_page: u32, current_page: u32) -> Self {
        let pages = pages.max(1);
        let per_page = per_page.max(1);
        let current_page = current_page.clamp(1, pages);
        Self {
            pages,
            per_page,
            current_page,
        }
    }

    /// Navigates to the first page.
    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    /// Navigates to the previous page, wrapping to the last page.
    pub fn prev_page(&mut self) {
        self.current_page = if self.current_page > 1 {
            self.current_page - 1
        } else {
            self.pages
        };
    }

    /// Navigates to the next page, wrapping to the first page.
    pub fn next_page(&mut self) {
        self.current_page = if self.current_page < self.pages {
            self.current_page + 1
        } else {
            1
        };
    }

    /// Navigates to the last page.
    pub fn last_page(&mut self) {
        self.current_page = self.pages;
    }

    /// Returns the zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        (self.current_page - 1) as usize
    }
}

custom_id_enum!(PaginationAction {
    First,
    Prev,
    Page,
    Next,
    Last,
});

/// View that provides wrap-around pagination controls for multi-page content.
pub struct PaginationView {
    pub state: PaginationModel,
}

impl<'a> ViewProvider<'a> for PaginationView {
    fn create(&self) -> Vec<CreateComponent<'a>> {
        let page_label = format!("{}/{}", self.state.current_page, self.state.pages);

        vec![CreateComponent::ActionRow(CreateActionRow::Buttons(
            vec![
                CreateButton::new(PaginationAction::First.as_str()).label("⏮"),
                CreateButton::new(PaginationAction::Prev.as_str()).label("◀"),
                CreateButton::new(PaginationAction::Page.as_str())
                    .label(page_label)
                    .disabled(true)
                    .style(ButtonStyle::Secondary),
                CreateButton::new(PaginationAction::Next.as_str()).label("▶"),
                CreateButton::new(PaginationAction::Last.as_str()).label("⏭"),
            ]
            .into(),
        ))]
    }
}

#[async_trait::async_trait]
impl InteractableComponentView<PaginationAction> for PaginationView {
    async fn handle(&mut self, interaction: &ComponentInteraction) -> Option<PaginationAction> {
        let action = PaginationAction::from_str(&interaction.data.custom_id).ok()?;

        match action {
            PaginationAction::First => self.state.first_page(),
            PaginationAction::Prev => self.state.prev_page(),
            PaginationAction::Next => self.state.next_page(),
            PaginationAction::Last => self.state.last_page(),
            _ => return None,
        }

        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_new() {
        let p = PaginationModel::new(10, 5, 1);
        assert_eq!(p.pages, 10);
        assert_eq!(p.per_page, 5);
        assert_eq!(p.current_page, 1);

        // Clamping current_page
        let p = PaginationModel::new(10, 5, 0);
        assert_eq!(p.current_page, 1);

        let p = PaginationModel::new(10, 5, 11);
        assert_eq!(p.current_page, 10);

        // Minimal values
        let p = PaginationModel::new(0, 0, 0);
        assert_eq!(p.pages, 1);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_pagination_wraps_around() {
        let mut p = PaginationModel::new(5, 10, 1);

        p.prev_page();
        assert_eq!(p.current_page, 5);

        p.next_page();
        assert_eq!(p.current_page, 1);

        p.last_page();
        assert_eq!(p.current_page, 5);

        p.next_page();
        assert_eq!(p.current_page, 1);

        p.first_page();
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn test_single_page_navigation_is_stable() {
        let mut p = PaginationModel::new(1, 100, 1);

        p.next_page();
        assert_eq!(p.current_page, 1);

        p.prev_page();
        assert_eq!(p.current_page, 1);
    }
}
