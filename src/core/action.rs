// Author: Dustin Pilgrim
// License: MIT

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Tell the user to take a break; carries the accumulated working time.
    Remind {
        worked_secs: u64,
    },

    /// Tell the user the rest was long enough.
    RestComplete,
}
