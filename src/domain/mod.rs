mod budget;
mod expense;
mod ledger;
mod money;

pub use budget::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
