mod five;
mod forbidden;
mod jump;

pub use five::{check_five, check_win};
pub use forbidden::{check_forbidden_move, ForbiddenKind, ForbiddenResult};
pub use jump::{check_jump_four, check_jump_three};
