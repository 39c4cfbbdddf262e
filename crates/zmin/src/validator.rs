// SPDX-License-Identifier: MIT OR Apache-2.0
//! `validate` stays an out-of-core-scope collaborator (`spec.md` §1, §6):
//! `zmin` exposes the seam an external crate would implement full JSON
//! grammar validation against, but ships no implementation of its own.

use zmin_core::error::Result;

/// Full JSON-grammar validation, with precise diagnostics, is explicitly
/// out of scope for this workspace (`spec.md` §1 Non-goals). This trait
/// names the seam a collaborating crate could satisfy; `zmin` itself
/// never constructs a value implementing it.
pub trait Validator {
    /// Validate `input` as well-formed JSON, or report why it is not.
    ///
    /// # Errors
    ///
    /// Implementations report malformed input as an error; `zmin` does
    /// not prescribe the error's shape beyond the shared
    /// [`zmin_core::error::ZminError`] taxonomy.
    fn validate(&self, input: &[u8]) -> Result<()>;
}
