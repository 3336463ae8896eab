use crate::bot::Data;

pub mod fun_cog;
pub mod owner_cog;
pub mod timezone_cog;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub use fun_cog::FunCog;
pub use owner_cog::OwnerCog;
use poise::Command;
pub use timezone_cog::TimezoneCog;

pub trait Cog {
    fn commands(&self) -> Vec<Command<Data, Error>>;
}

pub struct Cogs;

impl Cog for Cogs {
    fn commands(&self) -> Vec<Command<Data, Error>> {
        let timezone_cog = TimezoneCog;
        let fun_cog = FunCog;
        let owner_cog = OwnerCog;

        timezone_cog
            .commands()
            .into_iter()
            .chain(fun_cog.commands())
            .chain(owner_cog.commands())
            .collect()
    }
}
