//! Jurisdiction → trusted domain mapping.

use crate::core::jurisdiction::{DEFAULT_JURISDICTION, Jurisdiction};
use std::collections::BTreeMap;

const BUILTIN: &[(&str, &[&str])] = &[
    ("US", &["dol.gov", "eeoc.gov", "nlrb.gov", "osha.gov"]),
    ("UK", &["gov.uk", "acas.org.uk", "hse.gov.uk"]),
    ("SG", &["mom.gov.sg", "cpf.gov.sg", "iras.gov.sg"]),
    ("AU", &["fairwork.gov.au", "safeworkaustralia.gov.au"]),
    ("CA", &["canada.ca", "labour.gc.ca"]),
    ("DE", &["bmas.de", "arbeitsagentur.de"]),
    ("FR", &["travail-emploi.gouv.fr", "service-public.fr"]),
    ("IN", &["labour.gov.in", "epfindia.gov.in"]),
    ("MY", &["mohr.gov.my", "kwsp.gov.my"]),
    ("HK", &["labour.gov.hk", "mpf.org.hk"]),
    ("JP", &["mhlw.go.jp", "jil.go.jp"]),
    ("ID", &["kemnaker.go.id"]),
    ("TH", &["mol.go.th"]),
];

/// Static table of trusted search domains per jurisdiction.
///
/// Lookups for an unmapped jurisdiction fall back to the default
/// jurisdiction's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedDomains {
    table: BTreeMap<String, Vec<String>>,
    default_code: String,
}

impl TrustedDomains {
    /// The built-in table with `US` as the default.
    pub fn builtin() -> Self {
        let table = BUILTIN
            .iter()
            .map(|(code, domains)| {
                (
                    code.to_string(),
                    domains.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect();
        Self {
            table,
            default_code: DEFAULT_JURISDICTION.to_string(),
        }
    }

    /// Add or replace the domain list for one jurisdiction.
    pub fn with_domains(mut self, jurisdiction: &Jurisdiction, domains: Vec<String>) -> Self {
        self.table.insert(jurisdiction.code().to_string(), domains);
        self
    }

    /// Change which jurisdiction unmapped lookups fall back to.
    pub fn with_default(mut self, jurisdiction: &Jurisdiction) -> Self {
        self.default_code = jurisdiction.code().to_string();
        self
    }

    /// Trusted domains for `jurisdiction`, in priority order.
    pub fn domains_for(&self, jurisdiction: &Jurisdiction) -> &[String] {
        self.table
            .get(jurisdiction.code())
            .or_else(|| self.table.get(&self.default_code))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `jurisdiction` has its own entry.
    pub fn is_mapped(&self, jurisdiction: &Jurisdiction) -> bool {
        self.table.contains_key(jurisdiction.code())
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// All mapped jurisdictions with their domains, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.table.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Default for TrustedDomains {
    fn default() -> Self {
        Self::builtin()
    }
}
