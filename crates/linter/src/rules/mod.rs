//! RingCentral lint rules
//!
//! Rules ported from eslint-plugin-ringcentral

pub mod specified_comment_with_task_id;
pub mod too_many_brand_check_call;

// Re-export rule structs
pub use specified_comment_with_task_id::SpecifiedCommentWithTaskId;
pub use too_many_brand_check_call::{NodeCache, TooManyBrandCheckCall, TooManyBrandCheckCallConfig};
