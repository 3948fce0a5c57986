//! Domain entities - the core business objects.

mod category;
mod post;
mod post_id;
mod validation;

pub use category::Category;
pub use post::{BlogPost, PostRecord, SlugMatch, UpdateOutcome};
pub use post_id::{POST_ID_LEN, PostId};
pub use validation::{
    IssueCode, ValidationErrors, ValidationIssue, is_absolute_url, parse_calendar_date,
};
