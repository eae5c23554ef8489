//! Bracketed optional parameter segments (`{tag:body}`) attached to a spawn record.

/// A settings type that can be built from the body of one `{tag:body}` segment.
pub trait SegmentBody: Sized {
    /// Lowercase keyword selecting this settings type.
    const TAG: &'static str;

    fn from_body(body: &str) -> Self;
}

/// One recognized segment after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalSegment {
    Spawn(SpawnSettings),
}

/// Describes a keyword the parser knows how to build.
#[derive(Debug)]
pub struct SegmentSpec {
    pub tag: &'static str,
    /// Author facing description of what the segment controls.
    pub description: &'static str,
    pub build: fn(&str) -> OptionalSegment,
}

pub const OPTIONAL_SEGMENTS: &[SegmentSpec] = &[SegmentSpec {
    tag: SpawnSettings::TAG,
    description: "Spawn-time conditions evaluated by the host when this rule is drawn.",
    build: build_spawn,
}];

fn build_spawn(body: &str) -> OptionalSegment {
    OptionalSegment::Spawn(SpawnSettings::from_body(body))
}

/// Look up the segment registered for a lowercase tag.
pub fn segment_spec(tag: &str) -> Option<&'static SegmentSpec> {
    OPTIONAL_SEGMENTS.iter().find(|spec| spec.tag == tag)
}

/// Parsed view over every recognized optional segment of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalSettings {
    spawning: SpawnSettings,
}

impl OptionalSettings {
    pub fn spawning(&self) -> &SpawnSettings {
        &self.spawning
    }

    fn apply(&mut self, segment: OptionalSegment) {
        match segment {
            OptionalSegment::Spawn(settings) => self.spawning = settings,
        }
    }
}

/// Parse the optional text of a record. Unknown tags are skipped and the
/// last segment for a given tag wins.
pub fn parse_optional_settings(raw: &str) -> OptionalSettings {
    let mut settings = OptionalSettings::default();
    if raw.is_empty() {
        return settings;
    }

    for segment in raw.split('{') {
        let segment = segment.trim_end_matches('}');
        if segment.is_empty() {
            continue;
        }
        let (tag, body) = segment.split_once(':').unwrap_or((segment, ""));
        let tag = tag.trim().to_lowercase();
        if let Some(spec) = segment_spec(&tag) {
            settings.apply((spec.build)(body));
        }
    }
    settings
}

/// Settings carried by the `spawn` segment.
///
/// The body is kept verbatim for the host; [`SpawnSettings::parameter`]
/// offers a lenient view of comma-separated `name=value` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnSettings {
    enabled: bool,
    body: String,
    parameters: Vec<(String, String)>,
}

impl SpawnSettings {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.parameters
            .iter()
            .rev()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn int_parameter(&self, name: &str) -> Option<i32> {
        self.parameter(name)
            .and_then(|value| value.trim().parse::<i32>().ok())
    }

    /// True for a bare token such as `{spawn:sky}`.
    pub fn has_flag(&self, name: &str) -> bool {
        self.parameter(name).is_some_and(str::is_empty)
    }
}

impl SegmentBody for SpawnSettings {
    const TAG: &'static str = "spawn";

    fn from_body(body: &str) -> Self {
        let parameters = body
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.trim().to_lowercase(), value.trim().to_string()),
                None => (token.to_lowercase(), String::new()),
            })
            .collect();
        Self {
            enabled: true,
            body: body.to_string(),
            parameters,
        }
    }
}
