mod delimited_list;
mod player_state;

pub use delimited_list::DelimitedList;
pub use player_state::PlayerTriggerState;
