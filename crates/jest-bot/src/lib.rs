pub mod policy;
pub mod table;

pub use policy::{
    BotStyle, DefensivePolicy, GreedyPolicy, Policy, PolicyContext, RandomPolicy, UnknownStyle,
};
pub use table::Table;
