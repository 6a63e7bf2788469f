use std::collections::HashMap;

/// One input row as read from the source, keyed by its field names.
pub type RawRecord = HashMap<String, String>;

pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const DATE: &str = "Date";
pub const AMOUNT: &str = "Amount";
pub const NARRATIVE: &str = "Narrative";

/// Every field name a canonical record is read from.
pub const CANONICAL_FIELDS: [&str; 5] = [DATE, FROM, TO, NARRATIVE, AMOUNT];

/// A record after field-name normalization. Values are still the raw text;
/// dates and amounts are validated by the ledger builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub date: String,
    pub from: String,
    pub to: String,
    pub narrative: String,
    pub amount: String,
}

/// Maps alternate field names onto the canonical ones.
///
/// Counterparty columns have been seen as both `From`/`To` and
/// `FromAccount`/`ToAccount`, so those are recognised out of the box and
/// further aliases can be registered with [`SynonymTable::insert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynonymTable {
    aliases: Vec<(String, &'static str)>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("FromAccount", FROM);
        table.insert("ToAccount", TO);
        table
    }
}

impl SynonymTable {
    pub fn empty() -> Self {
        Self {
            aliases: Vec::new(),
        }
    }

    /// Registers `alias` as another name for `canonical`. Returns false
    /// without changing the table when `canonical` is not a canonical
    /// field name.
    pub fn insert(&mut self, alias: &str, canonical: &str) -> bool {
        let canonical = match CANONICAL_FIELDS.iter().find(|field| **field == canonical) {
            Some(field) => *field,
            None => return false,
        };

        match self.aliases.iter_mut().find(|(known, _)| known == alias) {
            Some(entry) => entry.1 = canonical,
            None => self.aliases.push((alias.to_string(), canonical)),
        }
        true
    }

    /// Resolves the canonical field `alias` stands for, if any.
    pub fn resolve(&self, alias: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .find(|(known, _)| known == alias)
            .map(|(_, canonical)| *canonical)
    }

    /// Normalizes a single record. A canonical key present in the record
    /// takes precedence over any of its synonyms; absent fields are left
    /// empty.
    pub fn normalize(&self, raw: &RawRecord) -> CanonicalRecord {
        CanonicalRecord {
            date: self.field(raw, DATE),
            from: self.field(raw, FROM),
            to: self.field(raw, TO),
            narrative: self.field(raw, NARRATIVE),
            amount: self.field(raw, AMOUNT),
        }
    }

    pub fn normalize_batch(&self, batch: Vec<RawRecord>) -> Vec<CanonicalRecord> {
        batch.iter().map(|raw| self.normalize(raw)).collect()
    }

    fn field(&self, raw: &RawRecord, canonical: &str) -> String {
        if let Some(value) = raw.get(canonical) {
            return value.clone();
        }

        self.aliases
            .iter()
            .filter(|(_, target)| *target == canonical)
            .find_map(|(alias, _)| raw.get(alias))
            .cloned()
            .unwrap_or_default()
    }
}
