//! Alignment core - policies, pass planning, batch transforms, sessions

pub mod batch;
pub mod plan;
pub mod policy;
pub mod session;

pub use batch::{align_now, unalign};
pub use plan::{apply_pass, plan_pass, AlignPass, LineEdit};
pub use policy::{fibonacci_indent_width, target_widths, AlignPolicy};
pub use session::{AlignSession, ChangeAction, CompletionAction, PassState, ReadyAction};
