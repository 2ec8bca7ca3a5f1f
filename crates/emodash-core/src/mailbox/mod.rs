//! Mailbox view and compose lifecycle.

mod compose;
mod view;

pub use compose::{
    ComposeField, ComposeState, DEFAULT_SEND_BODY, DEFAULT_SUBJECT, extract_address,
};
pub use view::{
    EMPTY_DETAIL_PLACEHOLDER, EmailDetail, EmailRow, OpenAction, RowAction, email_rows,
    visible_emails,
};
