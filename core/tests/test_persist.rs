// Write-back and verification suite.

// * confirmation gate
// * per-file failure isolation
// * raw 20-byte .sig files on disk
// * verify statuses

#[cfg(test)]
mod tests {

use std::fs;
use std::io;

use savesig_core::{
    config::SignConfig,
    constants::{input_names, sig_names, ENTRY_COUNT_OFFSET, RESOURCE_LIST_OFFSET},
    io::{MemorySave, SaveDirectory, SigSink},
    pipeline::SignSession,
    signing::{persist_signatures, verify_signatures, write_signatures, SignatureName, SignatureSet, VerifyStatus},
    types::SignError,
};

    fn synthetic_savegame() -> Vec<u8> {
        let mut buf: Vec<u8> = (0..200u32).map(|i| i as u8).collect();
        buf[ENTRY_COUNT_OFFSET..ENTRY_COUNT_OFFSET + 4].copy_from_slice(&1u32.to_le_bytes());
        buf[RESOURCE_LIST_OFFSET..RESOURCE_LIST_OFFSET + 4].copy_from_slice(&168u32.to_le_bytes());
        buf
    }

    fn synthetic_folder() -> MemorySave {
        MemorySave::new()
            .with(input_names::SCREEN, b"screen".to_vec())
            .with(input_names::PARTY_TABLE, b"party".to_vec())
            .with(input_names::GLOBAL_VARS, b"globals".to_vec())
            .with(input_names::SAVE_INFO, b"info".to_vec())
            .with(input_names::SAVEGAME, synthetic_savegame())
    }

    fn signed(folder: &MemorySave) -> SignatureSet {
        SignSession::new(SignConfig::default()).sign_source(folder).unwrap()
    }

    /// Refuses one file name, accepts the rest.
    struct FailingSink {
        inner: MemorySave,
        refuse: &'static str,
    }

    impl SigSink for FailingSink {
        fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
            if name == self.refuse {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.inner.write(name, bytes)
        }
    }

// ## 1️⃣ Confirmation gate

    #[test]
    fn declined_confirmation_writes_nothing() {
        let mut folder = synthetic_folder();
        let set = signed(&folder);

        let mut asked = 0;
        let report = persist_signatures(&set, &mut folder, |s| {
            asked += 1;
            assert_eq!(s.len(), 7);
            false
        });

        assert_eq!(asked, 1);
        assert!(!report.confirmed);
        assert!(report.written.is_empty() && report.failed.is_empty());
        assert!(folder.get(sig_names::SCREEN).is_none());
    }

    #[test]
    fn confirmed_write_stores_raw_digests() {
        let mut folder = synthetic_folder();
        let set = signed(&folder);

        let report = persist_signatures(&set, &mut folder, |_| true);
        assert!(report.is_complete());
        assert_eq!(report.written, SignatureName::ALL.to_vec());

        for record in &set {
            let bytes = folder.get(record.name.file_name()).unwrap();
            assert_eq!(bytes.len(), 20);
            assert_eq!(bytes, record.digest.as_bytes());
        }
    }

    #[test]
    fn existing_sig_files_are_overwritten() {
        let mut folder = synthetic_folder().with(sig_names::SAVE_DATA, b"stale".to_vec());
        let set = signed(&folder);

        write_signatures(&set, &mut folder);
        assert_eq!(folder.get(sig_names::SAVE_DATA).unwrap(), set.get(SignatureName::SaveData).unwrap().as_bytes());
    }

// ## 2️⃣ Failure isolation

    #[test]
    fn one_failed_write_does_not_stop_the_others() {
        let folder = synthetic_folder();
        let set = signed(&folder);
        let mut sink = FailingSink { inner: MemorySave::new(), refuse: sig_names::SAVE_VARS };

        let report = persist_signatures(&set, &mut sink, |_| true);

        assert!(report.confirmed);
        assert!(!report.is_complete());
        assert_eq!(report.written.len(), 6);
        assert_eq!(report.failed.len(), 1);

        let (name, err) = &report.failed[0];
        assert_eq!(*name, SignatureName::SaveVars);
        assert!(matches!(err, SignError::OutputWriteFailure { name, .. } if name == sig_names::SAVE_VARS));

        assert!(sink.inner.get(sig_names::SAVE_VARS).is_none());
        assert!(sink.inner.get(sig_names::SAVE_DATA).is_some());
    }

    #[test]
    fn session_counts_writes() {
        let folder = synthetic_folder();
        let mut session = SignSession::new(SignConfig::default());
        let set = session.sign_source(&folder).unwrap();

        let mut sink = FailingSink { inner: MemorySave::new(), refuse: sig_names::SCREEN };
        session.persist(&set, &mut sink, |_| true);

        assert_eq!(session.counters().writes_ok, 6);
        assert_eq!(session.counters().writes_failed, 1);
    }

// ## 3️⃣ Verification

    #[test]
    fn verify_reports_each_status() {
        let mut folder = synthetic_folder();
        let set = signed(&folder);
        write_signatures(&set, &mut folder);

        folder.remove(sig_names::SAVE_INFO);
        folder.insert(sig_names::SAVE_PARTY, vec![0u8; 20]);
        folder.insert(sig_names::SAVE_HEADERVAR, vec![1u8; 7]);

        let report = verify_signatures(&set, &folder);
        assert!(!report.all_match());
        assert_eq!(report.entries.len(), 7);

        assert_eq!(report.status(SignatureName::Screen), Some(&VerifyStatus::Match));
        assert_eq!(report.status(SignatureName::SaveInfo), Some(&VerifyStatus::Missing));
        assert_eq!(report.status(SignatureName::SaveHeaderVar), Some(&VerifyStatus::Malformed { len: 7 }));
        assert!(matches!(report.status(SignatureName::SaveParty), Some(VerifyStatus::Mismatch { .. })));
    }

    #[test]
    fn verify_report_serializes_with_status_tag() {
        let folder = synthetic_folder();
        let set = signed(&folder);
        let report = verify_signatures(&set, &folder);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value[0]["name"], "Screen.sig");
        assert_eq!(value[0]["status"], "missing");
    }

// ## 4️⃣ Filesystem round trip

    #[test]
    fn directory_round_trip_then_tamper() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join(input_names::SCREEN), b"screen").unwrap();
        fs::write(root.join(input_names::PARTY_TABLE), b"party").unwrap();
        fs::write(root.join(input_names::GLOBAL_VARS), b"globals").unwrap();
        fs::write(root.join(input_names::SAVE_INFO), b"info").unwrap();
        fs::write(root.join(input_names::SAVEGAME), synthetic_savegame()).unwrap();

        let mut dir = SaveDirectory::open(root).unwrap();
        let mut session = SignSession::new(SignConfig::default());
        let set = session.sign_source(&dir).unwrap();
        assert_eq!(set.get(SignatureName::SaveHeader).unwrap().to_hex(), "12715489261ba03c1ed6572304d595846ec1012e");

        let report = session.persist(&set, &mut dir, |_| true);
        assert!(report.is_complete());
        assert_eq!(fs::read(root.join(sig_names::SAVE_HEADER)).unwrap().len(), 20);
        assert!(session.verify(&set, &dir).all_match());

        fs::write(root.join(sig_names::SCREEN), [0u8; 20]).unwrap();
        let report = session.verify(&set, &dir);
        assert!(matches!(report.status(SignatureName::Screen), Some(VerifyStatus::Mismatch { .. })));
        assert_eq!(report.status(SignatureName::SaveData), Some(&VerifyStatus::Match));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(SaveDirectory::open(tmp.path().join("nope")).is_err());
    }
}
