//! Test fixtures for integration tests.

use assay::source::Source;

pub const DEFAULT_SUBJECT: &str = "solid-state batteries";

pub const TECHNOLOGY_SECTION: &str = "The technology relies on a sulfide electrolyte architecture \
    that replaces flammable liquid cells, and its implementation uses a dry-room process.";

pub const MARKET_SECTION: &str = "The market for electric vehicles is expected to reach $120 billion \
    by 2030, with customer demand growing 25% per year according to Bloomberg New Energy Finance.";

pub const RISK_SECTION: &str = "Key risks include manufacturing limitations, dendrite formation, \
    and supply-chain uncertainty around lithium.";

pub const CONCLUSION_SECTION: &str = "In conclusion, the approach is promising but needs \
    sustained investment over the next decade.";

/// Builds analysis text section by section.
#[derive(Default)]
pub struct AnalysisBuilder {
    sections: Vec<String>,
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Technology, market, risk, and conclusion sections.
    pub fn complete() -> Self {
        Self::new()
            .section(TECHNOLOGY_SECTION)
            .section(MARKET_SECTION)
            .section(RISK_SECTION)
            .section(CONCLUSION_SECTION)
    }

    pub fn section(mut self, text: impl Into<String>) -> Self {
        self.sections.push(text.into());
        self
    }

    /// Pads the text with neutral filler until it reaches `chars` characters.
    pub fn padded_to(mut self, chars: usize) -> Self {
        let filler = "Engineers continue to refine the design.";
        while self.build().chars().count() < chars {
            self.sections.push(filler.to_string());
        }
        self
    }

    pub fn build(&self) -> String {
        self.sections.join(" ")
    }
}

/// Builds a [`Source`] with sensible defaults.
pub struct SourceBuilder {
    uri: String,
    title: String,
    domain: String,
    snippet: Option<String>,
}

impl SourceBuilder {
    pub fn new(domain: &str) -> Self {
        Self {
            uri: format!("https://{domain}/article"),
            title: "Untitled".to_string(),
            domain: domain.to_string(),
            snippet: None,
        }
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    pub fn build(self) -> Source {
        let source = Source::new(self.uri, self.title, self.domain);
        match self.snippet {
            Some(snippet) => source.with_snippet(snippet),
            None => source,
        }
    }
}

pub fn academic_source() -> Source {
    SourceBuilder::new("nature.com")
        .title("Peer-reviewed journal study")
        .snippet("doi 10.1038/s41586-024-0001, Lee et al.")
        .build()
}

pub fn government_source() -> Source {
    SourceBuilder::new("energy.gov")
        .title("Battery research report")
        .build()
}

pub fn press_source() -> Source {
    SourceBuilder::new("reuters.com")
        .title("Industry analysis")
        .build()
}

pub fn blog_source() -> Source {
    SourceBuilder::new("randomblog.net")
        .title("Opinion blog post")
        .build()
}

pub fn strong_sources() -> Vec<Source> {
    vec![academic_source(), government_source(), press_source()]
}
