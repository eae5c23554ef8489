//! Spawn rule entities and the text codec used to persist them.
//!
//! A [`SpawnRule`] is keyed by `(creature, group_id)`; its scalar tuning is
//! stored as a single delimited record by [`FieldCodec`], optionally followed
//! by bracketed `{tag:body}` segments that [`parse_optional_settings`] turns
//! into typed settings.

mod codec;
mod error;
mod optional;
mod rule;

pub use codec::{FieldCodec, FieldFallback, DEFAULT_DELIMITER};
pub use error::{IdentityField, SpawnRuleError};
pub use optional::{
    parse_optional_settings, segment_spec, OptionalSegment, OptionalSettings, SegmentBody,
    SegmentSpec, SpawnSettings, OPTIONAL_SEGMENTS,
};
pub use rule::{SpawnRule, SpawnRuleKey, SpawnTuning};
