//! The concrete commands. Each module supplies only the pieces the shared
//! executor is parameterized by: a spinner label, the privileged call, a
//! status table, and success output.

pub mod cancel;
pub mod execute;
pub mod info;
