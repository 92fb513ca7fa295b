//! Command trait shared by every `monkeysort` subcommand.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Implemented by each CLI subcommand; dispatched through `enum_dispatch`.
#[enum_dispatch]
pub trait Command {
    fn execute(&self) -> Result<()>;
}
