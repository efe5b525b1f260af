use core::fmt;

use crate::Error;

/// An attack-signature family recognized by the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    /// Always-true condition such as `' OR '1'='1`.
    Tautology,
    /// `--` or `/*` truncating the rest of the query.
    Comment,
    /// `UNION [ALL] SELECT`.
    UnionSelect,
    /// `;` followed by a complete statement keyword.
    StackedQuery,
}

impl Signature {
    /// Reporting order used when several families accept on the same character.
    pub const PRIORITY: [Signature; 4] = [
        Signature::Tautology,
        Signature::Comment,
        Signature::UnionSelect,
        Signature::StackedQuery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Signature::Tautology => "tautology",
            Signature::Comment => "comment",
            Signature::UnionSelect => "union-select",
            Signature::StackedQuery => "stacked-query",
        }
    }

    /// Parses the names produced by [`Signature::name`], case-insensitively.
    pub fn from_name(name: &str) -> Option<Signature> {
        Signature::PRIORITY
            .into_iter()
            .find(|sig| sig.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The single-member set for this family.
    pub fn as_set(&self) -> SignatureSet {
        match self {
            Signature::Tautology => SignatureSet::TAUTOLOGY,
            Signature::Comment => SignatureSet::COMMENT,
            Signature::UnionSelect => SignatureSet::UNION_SELECT,
            Signature::StackedQuery => SignatureSet::STACKED_QUERY,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of signature families.
    ///
    /// Serves both as the result of an acceptance check (which families have
    /// an accepting state in the frontier) and as scanner configuration
    /// (which families are allowed to produce a verdict).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SignatureSet: u8 {
        const TAUTOLOGY = 1 << 0;
        const COMMENT = 1 << 1;
        const UNION_SELECT = 1 << 2;
        const STACKED_QUERY = 1 << 3;
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        SignatureSet::all()
    }
}

impl SignatureSet {
    /// Highest-priority family in the set.
    pub fn first(&self) -> Option<Signature> {
        self.signatures().next()
    }

    /// Parses a comma-separated list of family names; `all` selects every
    /// family.
    pub fn parse_list(list: &str) -> Result<SignatureSet, Error> {
        let mut set = SignatureSet::empty();
        for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            if name.eq_ignore_ascii_case("all") {
                set |= SignatureSet::all();
                continue;
            }
            let sig = Signature::from_name(name)
                .ok_or_else(|| Error::UnknownSignature(name.to_string()))?;
            set |= sig.as_set();
        }
        if set.is_empty() {
            return Err(Error::InvalidInput("empty signature list"));
        }
        Ok(set)
    }

    /// Members of the set in priority order.
    pub fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        Signature::PRIORITY
            .into_iter()
            .filter(move |sig| self.contains(sig.as_set()))
    }
}

impl From<Signature> for SignatureSet {
    fn from(sig: Signature) -> Self {
        sig.as_set()
    }
}

impl FromIterator<Signature> for SignatureSet {
    fn from_iter<I: IntoIterator<Item = Signature>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SignatureSet::empty(), |set, sig| set | sig.as_set())
    }
}

impl fmt::Display for SignatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for sig in self.signatures() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(sig.name())?;
            first = false;
        }
        Ok(())
    }
}
