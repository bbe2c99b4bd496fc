use crate::dispatcher::DispatcherBuilder;

/// A unit of bot functionality installed during setup.
///
/// `init` performs registrations on the builder. An error (or panic) is
/// reported to the loader, which skips the plugin and carries on.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn init(&self, bot: &mut DispatcherBuilder) -> anyhow::Result<()>;
}
