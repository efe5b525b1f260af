use std::fmt;

use serde::Serialize;
use sqlifsm::{SignatureSet, Verdict};

/// Result of one `scan` invocation, printed as text or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub is_malicious: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    pub fields_scanned: usize,
}

impl ScanReport {
    pub fn from_verdict(verdict: &Verdict<'_>) -> Self {
        match &verdict.detection {
            Some(detection) => ScanReport {
                is_malicious: true,
                signature: Some(detection.signature.name()),
                signatures: detection.signatures.signatures().map(|sig| sig.name()).collect(),
                source: Some(detection.field.source.to_string()),
                value: Some(detection.field.value.to_string()),
                offset: Some(detection.offset),
                fields_scanned: verdict.fields_scanned,
            },
            None => ScanReport::benign(verdict.fields_scanned),
        }
    }

    /// Report for a bare text scan, which is a single field.
    pub fn from_text(text: &str, accepted: Option<SignatureSet>) -> Self {
        match accepted {
            Some(set) => ScanReport {
                is_malicious: true,
                signature: set.first().map(|sig| sig.name()),
                signatures: set.signatures().map(|sig| sig.name()).collect(),
                source: Some("text".to_string()),
                value: Some(text.to_string()),
                offset: None,
                fields_scanned: 1,
            },
            None => ScanReport::benign(1),
        }
    }

    fn benign(fields_scanned: usize) -> Self {
        ScanReport {
            is_malicious: false,
            signature: None,
            signatures: Vec::new(),
            source: None,
            value: None,
            offset: None,
            fields_scanned,
        }
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_malicious {
            return write!(f, "benign ({} fields scanned)", self.fields_scanned);
        }
        write!(f, "malicious: {}", self.signatures.join(", "))?;
        if let Some(source) = &self.source {
            write!(f, " in {source}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " at offset {offset}")?;
        }
        if let Some(value) = &self.value {
            write!(f, "\n  value: {value:?}")?;
        }
        Ok(())
    }
}
