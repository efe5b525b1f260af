//! Drives the automaton over the candidate fields of a request.

use tracing::{debug, info};

use crate::fsm::Automaton;
use crate::normalize::normalize;
use crate::request::{CandidateField, FieldExtractor};
use crate::{Signature, SignatureSet};

/// The field that triggered a positive verdict and what matched in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection<'a> {
    /// The field as extracted, before normalization.
    pub field: CandidateField<'a>,
    /// Highest-priority family among `signatures`.
    pub signature: Signature,
    /// Every enabled family accepting on the triggering character.
    pub signatures: SignatureSet,
    /// Character index in the normalized field at which acceptance occurred.
    pub offset: usize,
}

impl Detection<'_> {
    pub fn into_owned(self) -> Detection<'static> {
        Detection {
            field: self.field.into_owned(),
            signature: self.signature,
            signatures: self.signatures,
            offset: self.offset,
        }
    }
}

/// Outcome of scanning one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict<'a> {
    pub detection: Option<Detection<'a>>,
    /// Number of fields fed to the automaton before the scan stopped.
    pub fields_scanned: usize,
}

impl<'a> Verdict<'a> {
    pub fn is_malicious(&self) -> bool {
        self.detection.is_some()
    }

    pub fn signature(&self) -> Option<Signature> {
        self.detection.as_ref().map(|d| d.signature)
    }

    pub fn field(&self) -> Option<&CandidateField<'a>> {
        self.detection.as_ref().map(|d| &d.field)
    }

    pub fn into_owned(self) -> Verdict<'static> {
        Verdict {
            detection: self.detection.map(Detection::into_owned),
            fields_scanned: self.fields_scanned,
        }
    }
}

/// Request scanner.
///
/// Holds one [`Automaton`], reset before every field, so a `Scanner` can be
/// reused across requests but must not be shared by concurrent scans.
#[derive(Debug, Clone)]
pub struct Scanner {
    automaton: Automaton,
    signatures: SignatureSet,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            automaton: Automaton::new(),
            signatures: SignatureSet::all(),
        }
    }

    /// Restricts which families may produce a positive verdict.
    pub fn with_signatures(mut self, signatures: SignatureSet) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn signatures(&self) -> SignatureSet {
        self.signatures
    }

    /// Extracts the fields of `raw` and scans them in order, stopping at the
    /// first detection.
    pub fn scan<'a>(&mut self, raw: &'a str) -> Verdict<'a> {
        let mut extractor = FieldExtractor::new(raw);
        let fields = extractor.extract();
        if !extractor.issues().is_empty() {
            debug!(issues = extractor.issues().len(), "extraction finished with issues");
        }
        self.scan_fields(fields)
    }

    /// Scans already-extracted fields in the given order.
    pub fn scan_fields<'a, I>(&mut self, fields: I) -> Verdict<'a>
    where
        I: IntoIterator<Item = CandidateField<'a>>,
    {
        let mut verdict = Verdict::default();
        for field in fields {
            verdict.fields_scanned += 1;
            if let Some(detection) = self.scan_field(field) {
                info!(
                    source = %detection.field.source,
                    signature = %detection.signature,
                    offset = detection.offset,
                    "sql injection signature matched"
                );
                verdict.detection = Some(detection);
                break;
            }
        }
        verdict
    }

    /// Normalizes and scans a single field.
    pub fn scan_field<'a>(&mut self, field: CandidateField<'a>) -> Option<Detection<'a>> {
        let hit = self.automaton.find(&normalize(&field.value), self.signatures)?;
        let signature = hit.signature()?;
        Some(Detection {
            field,
            signature,
            signatures: hit.signatures,
            offset: hit.offset,
        })
    }

    /// Normalizes and scans bare text, returning the accepting families.
    pub fn scan_text(&mut self, text: &str) -> Option<SignatureSet> {
        self.automaton
            .find(&normalize(text), self.signatures)
            .map(|hit| hit.signatures)
    }
}
