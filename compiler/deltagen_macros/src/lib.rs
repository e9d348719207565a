//! Procedural macros for deltagen.
//!
//! # TrackDelta Derive
//!
//! `#[derive(TrackDelta)]` marks a struct for delta generation. The derive
//! itself expands to nothing: the build-time generator finds the marker in
//! source and emits the delta type. What the derive does do is reject marker
//! arguments the generator could not honour, at the place they are written.
//!
//! ```text
//! #[derive(Clone, Debug, Default, PartialEq, TrackDelta)]
//! #[delta(suffix = "Changes", deep_tracking = false)]
//! pub struct Account {
//!     pub email: String,
//!     #[delta(ignore)]
//!     pub password_hash: String,
//! }
//! ```

mod track_delta;

use proc_macro::TokenStream;

/// Marker derive for delta generation.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[delta(suffix = "...")]` - Generated type name suffix (default `Delta`).
/// - `#[delta(deep_tracking = bool)]` - Expand nested tracked properties (default `true`).
/// - `#[delta(convenience_functions = bool)]` - Emit `delta_to` / `delta_from` (default `true`).
///
/// ## Field-level
/// - `#[delta(ignore)]` - Leave the field out of the delta type.
#[proc_macro_derive(TrackDelta, attributes(delta))]
pub fn derive_track_delta(input: TokenStream) -> TokenStream {
    track_delta::derive_track_delta(input)
}
