use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SpawnRuleError;
use crate::rule::{SpawnRule, SpawnTuning};

/// Separator between the scalar fields of a persisted record.
pub const DEFAULT_DELIMITER: char = '⟂';

const FIELD_COUNT: usize = 4;

/// Value substituted for a scalar field that does not parse as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFallback {
    /// Every field falls back to the defaults' pack size. This is how existing
    /// config files have always been repaired, so it stays the default.
    #[default]
    PackSize,
    /// Each field falls back to the same field of the defaults.
    PerField,
}

/// Converts a rule's scalar tuning to and from a delimited text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCodec {
    delimiter: char,
    fallback: FieldFallback,
}

impl Default for FieldCodec {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            fallback: FieldFallback::default(),
        }
    }
}

impl FieldCodec {
    /// The delimiter must not collide with the optional segment syntax or
    /// with characters that can appear inside a signed integer.
    pub fn new(delimiter: char) -> Result<Self, SpawnRuleError> {
        if matches!(delimiter, '{' | '}' | ':' | '+' | '-')
            || delimiter.is_ascii_digit()
            || delimiter.is_whitespace()
        {
            return Err(SpawnRuleError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            delimiter,
            fallback: FieldFallback::default(),
        })
    }

    pub fn with_fallback(mut self, fallback: FieldFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn fallback(&self) -> FieldFallback {
        self.fallback
    }

    /// Human readable description of the record layout, used as a config comment.
    pub fn format_comment(&self) -> String {
        let d = self.delimiter;
        format!("Editable Format: SpawnWeight{d}SpawnPackSize{d}MinChunkPackSize{d}MaxChunkPackSize")
    }

    /// Scalar fields followed directly by the rule's optional segments.
    pub fn encode(&self, rule: &SpawnRule) -> String {
        let mut text = self.encode_scalars(rule);
        text.push_str(rule.optional_text());
        text
    }

    pub fn encode_scalars(&self, rule: &SpawnRule) -> String {
        let d = self.delimiter;
        let tuning = rule.tuning();
        format!(
            "{}{d}{}{d}{}{d}{}",
            tuning.weight, tuning.pack_size, tuning.min_chunk_pack, tuning.max_chunk_pack
        )
    }

    /// Decode `text` into a new rule that takes its identity from `defaults`.
    ///
    /// A record without exactly four scalar fields is rejected. A field that is
    /// present but not an integer is replaced according to [`FieldFallback`].
    pub fn decode(&self, text: &str, defaults: &SpawnRule) -> Result<SpawnRule, SpawnRuleError> {
        let (scalars, optional_text) = match text.split_once('{') {
            Some((scalars, rest)) => (scalars, format!("{{{rest}")),
            None => (text, String::new()),
        };

        let mut fields: Vec<&str> = scalars.split(self.delimiter).collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        if fields.len() != FIELD_COUNT {
            return Err(SpawnRuleError::MalformedRecord {
                fields: fields.len(),
                record: text.to_string(),
            });
        }

        let fallback = self.fallback_tuning(defaults.tuning());
        let tuning = SpawnTuning {
            weight: parse_field(fields[0], fallback.weight, "spawnWeight"),
            pack_size: parse_field(fields[1], fallback.pack_size, "packSize"),
            min_chunk_pack: parse_field(fields[2], fallback.min_chunk_pack, "minChunkPack"),
            max_chunk_pack: parse_field(fields[3], fallback.max_chunk_pack, "maxChunkPack"),
        };

        Ok(SpawnRule::from_key(
            defaults.key().clone(),
            tuning,
            optional_text,
        ))
    }

    fn fallback_tuning(&self, defaults: SpawnTuning) -> SpawnTuning {
        match self.fallback {
            FieldFallback::PackSize => {
                let p = defaults.pack_size;
                SpawnTuning::new(p, p, p, p)
            }
            FieldFallback::PerField => defaults,
        }
    }
}

fn parse_field(value: &str, fallback: i32, field: &'static str) -> i32 {
    match value.trim().parse::<i32>() {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(
                target: "spawn_rules::codec",
                field,
                value,
                fallback,
                error = %err,
                "field.substituted"
            );
            fallback
        }
    }
}
