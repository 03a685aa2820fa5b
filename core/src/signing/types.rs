//! signing/types.rs
//! Output names, records and the ordered signature set.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::sig_names;
use crate::crypto::SignatureDigest;
use crate::layout::Section;

/// The seven `.sig` outputs, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignatureName {
    #[serde(rename = "Screen.sig")]
    Screen,
    #[serde(rename = "SAVE_PARTY.sig")]
    SaveParty,
    #[serde(rename = "SAVE_VARS.sig")]
    SaveVars,
    #[serde(rename = "SAVE_INFO.sig")]
    SaveInfo,
    #[serde(rename = "SAVE_HEADER.sig")]
    SaveHeader,
    #[serde(rename = "SAVE_HEADERVAR.sig")]
    SaveHeaderVar,
    #[serde(rename = "SAVE_DATA.sig")]
    SaveData,
}

/// The four inputs digested whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlatInput {
    Screen,
    PartyTable,
    GlobalVars,
    SaveInfo,
}

/// What a signature is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedSource {
    /// A flat input file, digested whole.
    File(FlatInput),
    /// A section of `SAVEGAME.sav`.
    Section(Section),
}

impl SignatureName {
    pub const ALL: [SignatureName; 7] = [
        SignatureName::Screen,
        SignatureName::SaveParty,
        SignatureName::SaveVars,
        SignatureName::SaveInfo,
        SignatureName::SaveHeader,
        SignatureName::SaveHeaderVar,
        SignatureName::SaveData,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SignatureName::Screen        => sig_names::SCREEN,
            SignatureName::SaveParty     => sig_names::SAVE_PARTY,
            SignatureName::SaveVars      => sig_names::SAVE_VARS,
            SignatureName::SaveInfo      => sig_names::SAVE_INFO,
            SignatureName::SaveHeader    => sig_names::SAVE_HEADER,
            SignatureName::SaveHeaderVar => sig_names::SAVE_HEADERVAR,
            SignatureName::SaveData      => sig_names::SAVE_DATA,
        }
    }

    pub fn source(self) -> SignedSource {
        match self {
            SignatureName::Screen        => SignedSource::File(FlatInput::Screen),
            SignatureName::SaveParty     => SignedSource::File(FlatInput::PartyTable),
            SignatureName::SaveVars      => SignedSource::File(FlatInput::GlobalVars),
            SignatureName::SaveInfo      => SignedSource::File(FlatInput::SaveInfo),
            SignatureName::SaveHeader    => SignedSource::Section(Section::Header),
            SignatureName::SaveHeaderVar => SignedSource::Section(Section::HeaderVars),
            SignatureName::SaveData      => SignedSource::Section(Section::Data),
        }
    }
}

impl fmt::Display for SignatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// One output: a canonical name and its digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub name: SignatureName,
    pub digest: SignatureDigest,
}

/// The seven records of one run, kept in canonical order.
///
/// Consumers should look records up by name; the order is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureSet {
    records: Vec<SignatureRecord>,
}

impl SignatureSet {
    /// Build from records in any order; stored sorted by canonical order.
    pub(crate) fn from_records(mut records: Vec<SignatureRecord>) -> Self {
        records.sort_by_key(|r| r.name);
        debug_assert_eq!(records.len(), SignatureName::ALL.len());
        Self { records }
    }

    pub fn get(&self, name: SignatureName) -> Option<&SignatureDigest> {
        self.records.iter().find(|r| r.name == name).map(|r| &r.digest)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File name -> lowercase hex digest.
    pub fn to_hex_map(&self) -> BTreeMap<&'static str, String> {
        self.records.iter().map(|r| (r.name.file_name(), r.digest.to_hex())).collect()
    }
}

impl<'a> IntoIterator for &'a SignatureSet {
    type Item = &'a SignatureRecord;
    type IntoIter = std::slice::Iter<'a, SignatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Raw bytes of the five input files plus the stored size of `SAVEGAME.sav`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInputs {
    pub screen: Vec<u8>,
    pub party_table: Vec<u8>,
    pub global_vars: Vec<u8>,
    pub save_info: Vec<u8>,
    pub savegame: Vec<u8>,
    /// Size reported by the filesystem, appended to HEADER before digesting.
    pub savegame_size: u64,
}

impl SaveInputs {
    /// Inputs whose stored size is simply the length of `savegame`.
    pub fn from_bytes(
        screen: impl Into<Vec<u8>>,
        party_table: impl Into<Vec<u8>>,
        global_vars: impl Into<Vec<u8>>,
        save_info: impl Into<Vec<u8>>,
        savegame: impl Into<Vec<u8>>,
    ) -> Self {
        let savegame = savegame.into();
        Self {
            screen: screen.into(),
            party_table: party_table.into(),
            global_vars: global_vars.into(),
            save_info: save_info.into(),
            savegame_size: savegame.len() as u64,
            savegame,
        }
    }

    /// Bytes of one flat input.
    pub fn file(&self, input: FlatInput) -> &[u8] {
        match input {
            FlatInput::Screen     => &self.screen,
            FlatInput::PartyTable => &self.party_table,
            FlatInput::GlobalVars => &self.global_vars,
            FlatInput::SaveInfo   => &self.save_info,
        }
    }
}

/// How the seven digests are scheduled. Output is identical either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    #[default]
    Sequential,
    Parallel,
}
