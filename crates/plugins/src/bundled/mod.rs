//! Plugins shipped with the bot.

pub mod calc;
pub mod case;
pub mod echo;
pub mod greet;
pub mod prefix;
pub mod reverse;

use std::sync::Arc;

use superbot_dispatch::Plugin;

/// Every bundled plugin.
pub fn all() -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(echo::EchoPlugin),
        Arc::new(case::UpperPlugin),
        Arc::new(case::LowerPlugin),
        Arc::new(reverse::ReversePlugin),
        Arc::new(greet::GreetPlugin),
        Arc::new(prefix::PrefixPlugin::default()),
        Arc::new(calc::CalcPlugin),
    ]
}
