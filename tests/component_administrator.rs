use std::io::Write;

use fragcrab::{
    AdminConfig, AdminError, BlacklistScope, ComponentAdministrator, LoadError, Role, Source,
};

const SCAFFOLDS: &str = "c%10([R1])ccccc%10[R2]\nC([R1])NCC([R2])O[R3]";
const LINKERS: &str = "[R]CC[A]\n[R]C(=O)N[A]\n[R][A]";
const BUILDING_BLOCKS: &str = "[A]c1ccccc1\n[A]C(C)C\n[A]OC\n[A]N1CCOCC1";

fn literal() -> ComponentAdministrator {
    ComponentAdministrator::new(SCAFFOLDS, LINKERS, BUILDING_BLOCKS, true).unwrap()
}

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn counts_equal_non_blank_lines() {
    let admin = ComponentAdministrator::new(
        "\nC[R1]\n\nN[R1]\n\n",
        "[R]C[A]\n   \n",
        "[A]O\n[A]S\n[A]Cl\n",
        true,
    )
    .unwrap();
    assert_eq!(admin.scaffold_count(), 2);
    assert_eq!(admin.linker_count(), 1);
    assert_eq!(admin.building_block_count(), 3);
}

#[test]
fn literal_and_path_sources_agree() {
    let dir = tempfile::tempdir().unwrap();
    let s = write_file(&dir, "scaffolds.smi", SCAFFOLDS);
    let l = write_file(&dir, "linkers.smi", LINKERS);
    let b = write_file(&dir, "building_blocks.smi", BUILDING_BLOCKS);

    let from_files = ComponentAdministrator::new(&s, &l, &b, false).unwrap();
    let from_text = literal();

    assert_eq!(from_files.scaffolds(), from_text.scaffolds());
    assert_eq!(from_files.linkers(), from_text.linkers());
    assert_eq!(from_files.building_blocks(), from_text.building_blocks());
}

#[test]
fn typed_sources() {
    let admin = ComponentAdministrator::from_sources(
        &Source::literal(SCAFFOLDS),
        &Source::literal(LINKERS),
        &Source::literal(BUILDING_BLOCKS),
        AdminConfig::default(),
    )
    .unwrap();
    assert_eq!(admin.scaffold_count(), 2);
    assert_eq!(admin.config().scope(), BlacklistScope::Combination);
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

#[test]
fn ids_are_one_based_decimal() {
    let admin = literal();
    for i in 0..admin.scaffold_count() {
        assert_eq!(admin.scaffold_id(i).unwrap(), (i + 1).to_string());
    }
    for i in 0..admin.linker_count() {
        assert_eq!(admin.linker_id(i).unwrap(), (i + 1).to_string());
    }
    for i in 0..admin.building_block_count() {
        assert_eq!(admin.building_block_id(i).unwrap(), (i + 1).to_string());
    }
}

#[test]
fn strings_round_trip() {
    let admin = literal();
    for (i, line) in SCAFFOLDS.lines().enumerate() {
        assert_eq!(admin.scaffold_string(i).unwrap(), line);
    }
    for (i, line) in LINKERS.lines().enumerate() {
        assert_eq!(admin.linker_string(i).unwrap(), line);
    }
    for (i, line) in BUILDING_BLOCKS.lines().enumerate() {
        assert_eq!(admin.building_block_string(i).unwrap(), line);
    }
}

#[test]
fn r_group_counts_batch_matches_single() {
    let admin = literal();
    let single: Vec<usize> = (0..admin.scaffold_count())
        .map(|i| admin.r_group_count(i).unwrap())
        .collect();
    assert_eq!(admin.r_group_counts(), single);
    assert_eq!(admin.r_group_counts(), vec![2, 3]);
}

#[test]
fn index_out_of_range() {
    let admin = literal();
    assert!(admin.scaffold(2).unwrap_err().is_index());
    assert!(admin.linker(3).unwrap_err().is_index());
    assert!(admin.building_block(4).unwrap_err().is_index());
    assert!(admin.scaffold_id(2).unwrap_err().is_index());
    assert!(admin.linker_id(usize::MAX).unwrap_err().is_index());
    assert!(admin.building_block_id(4).unwrap_err().is_index());
    assert!(admin.scaffold_string(2).unwrap_err().is_index());
    assert!(admin.r_group_count(2).unwrap_err().is_index());

    match admin.building_block(4) {
        Err(AdminError::Index { role, index, count }) => {
            assert_eq!(role, Role::BuildingBlock);
            assert_eq!(index, 4);
            assert_eq!(count, 4);
        }
        other => panic!("expected index error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Failure model
// ---------------------------------------------------------------------------

#[test]
fn empty_scaffold_path_is_load_error() {
    let err = ComponentAdministrator::new("", LINKERS, BUILDING_BLOCKS, false).unwrap_err();
    assert!(err.is_load());
    assert_eq!(err.role(), Role::Scaffold);
}

#[test]
fn empty_scaffold_literal_is_load_error() {
    let err = ComponentAdministrator::new("", LINKERS, BUILDING_BLOCKS, true).unwrap_err();
    assert!(matches!(
        err,
        AdminError::Load {
            role: Role::Scaffold,
            source: LoadError::Empty { .. }
        }
    ));
}

#[test]
fn scaffold_load_error_masks_later_problems() {
    // Linkers and building blocks are invalid too, but are never reached.
    let err = ComponentAdministrator::new("", "not a linker", "C(", false).unwrap_err();
    assert!(err.is_load());
    assert_eq!(err.role(), Role::Scaffold);
}

#[test]
fn missing_linker_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let s = write_file(&dir, "scaffolds.smi", SCAFFOLDS);
    let missing = dir.path().join("missing.smi");

    let err = ComponentAdministrator::new(&s, missing.to_str().unwrap(), "whatever", false)
        .unwrap_err();
    match err {
        AdminError::Load {
            role: Role::Linker,
            source: LoadError::Io { path, .. },
        } => assert_eq!(path, missing),
        other => panic!("expected linker io error, got {other:?}"),
    }
}

#[test]
fn bad_scaffold_is_conformity_error() {
    let err = ComponentAdministrator::new(
        "c%10([R1])ccccc%10[R2]\nC([R1])NCC([R2]O[R3]",
        LINKERS,
        BUILDING_BLOCKS,
        true,
    )
    .unwrap_err();
    assert!(err.is_conformity());
    assert!(!err.is_load());
    match err {
        AdminError::Conformity {
            role, line, text, ..
        } => {
            assert_eq!(role, Role::Scaffold);
            assert_eq!(line, 2);
            assert_eq!(text, "C([R1])NCC([R2]O[R3]");
        }
        other => panic!("expected conformity error, got {other:?}"),
    }
}

#[test]
fn scaffold_without_r_group_is_conformity_error() {
    let err =
        ComponentAdministrator::new("c1ccccc1", LINKERS, BUILDING_BLOCKS, true).unwrap_err();
    assert!(err.is_conformity());
}

#[test]
fn building_block_conformity_reported_last() {
    let err = ComponentAdministrator::new(SCAFFOLDS, LINKERS, "[A]O\nO", true).unwrap_err();
    assert!(err.is_conformity());
    assert_eq!(err.role(), Role::BuildingBlock);
}

#[test]
fn padded_line_is_conformity_error_with_verbatim_text() {
    let err = ComponentAdministrator::new("C[R1]  \n  N[R1]", "[R][A]", "[A]C", true)
        .unwrap_err();
    match err {
        AdminError::Conformity {
            role, line, text, ..
        } => {
            assert_eq!(role, Role::Scaffold);
            assert_eq!(line, 1);
            assert_eq!(text, "C[R1]  ");
        }
        other => panic!("expected conformity error, got {other:?}"),
    }
}

#[test]
fn hash_line_is_conformity_error() {
    let err =
        ComponentAdministrator::new("C[R1]\n#C[R1]\nN[R1]", LINKERS, BUILDING_BLOCKS, true)
            .unwrap_err();
    match err {
        AdminError::Conformity {
            role, line, text, ..
        } => {
            assert_eq!(role, Role::Scaffold);
            assert_eq!(line, 2);
            assert_eq!(text, "#C[R1]");
        }
        other => panic!("expected conformity error, got {other:?}"),
    }
}

#[test]
fn undecodable_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let s = write_file(&dir, "scaffolds.smi", SCAFFOLDS);
    let l = dir.path().join("linkers.smi");
    std::fs::write(&l, [b'[', b'R', b']', 0xff, 0xfe, b'[', b'A', b']']).unwrap();
    let b = write_file(&dir, "building_blocks.smi", BUILDING_BLOCKS);

    let err = ComponentAdministrator::new(&s, l.to_str().unwrap(), &b, false).unwrap_err();
    assert!(err.is_load());
    assert!(!err.is_conformity());
    match err {
        AdminError::Load {
            role: Role::Linker,
            source: LoadError::Io { path, source },
        } => {
            assert_eq!(path, l);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("expected linker io error, got {other:?}"),
    }
}

#[test]
fn stored_strings_match_source_lines_exactly() {
    let admin = ComponentAdministrator::new("C[R1]\r\n\n  \nN[R1]", "[R][A]", "[A]C", true)
        .unwrap();
    assert_eq!(admin.scaffold_string(0).unwrap(), "C[R1]");
    assert_eq!(admin.scaffold_string(1).unwrap(), "N[R1]");
    assert_eq!(admin.scaffold_id(1).unwrap(), "2");
}

// ---------------------------------------------------------------------------
// Number blacklisting
// ---------------------------------------------------------------------------

#[test]
fn number_blacklisted_by_scaffold() {
    let admin = literal();
    assert!(admin.number_blacklisted(10, 0, 0, 0));
    assert!(!admin.number_blacklisted(10, 1, 0, 0));
}

#[test]
fn number_blacklisted_scaffold_dimension_in_both_scopes() {
    for scope in [BlacklistScope::ScaffoldOnly, BlacklistScope::Combination] {
        let admin = ComponentAdministrator::with_config(
            SCAFFOLDS,
            LINKERS,
            BUILDING_BLOCKS,
            true,
            AdminConfig::default().blacklist_scope(scope),
        )
        .unwrap();
        assert!(admin.number_blacklisted(10, 0, 2, 1), "{scope:?}");
        assert!(!admin.number_blacklisted(10, 1, 2, 1), "{scope:?}");
    }
}

#[test]
fn building_block_label_depends_on_scope() {
    // Building block 0 uses ring label 1; no scaffold does.
    let combination = literal();
    assert!(combination.number_blacklisted(1, 1, 0, 0));
    assert!(!combination.number_blacklisted(1, 1, 0, 1));

    let scaffold_only = ComponentAdministrator::with_config(
        SCAFFOLDS,
        LINKERS,
        BUILDING_BLOCKS,
        true,
        AdminConfig::default().blacklist_scope(BlacklistScope::ScaffoldOnly),
    )
    .unwrap();
    assert!(!scaffold_only.number_blacklisted(1, 1, 0, 0));
}

#[test]
fn unused_indices_never_fail() {
    let admin = literal();
    assert!(admin.number_blacklisted(10, 0, usize::MAX, usize::MAX));
    assert!(!admin.number_blacklisted(10, usize::MAX, usize::MAX, usize::MAX));
    assert!(!admin.number_blacklisted(1, 1, 0, usize::MAX));
}

#[test]
fn first_free_number_avoids_every_fragment() {
    let admin = literal();
    // Scaffold 0 uses 10, building block 3 uses 1.
    let free = admin.first_free_number(0, 0, 3, 1).unwrap();
    assert_eq!(free, 2);
    assert!(!admin.number_blacklisted(free, 0, 0, 3));
    assert_eq!(admin.first_free_number(0, 0, 3, 10), Some(11));
}

#[test]
fn shared_across_threads() {
    let admin = literal();
    std::thread::scope(|scope| {
        for s in 0..admin.scaffold_count() {
            let admin = &admin;
            scope.spawn(move || {
                let expected = s == 0;
                assert_eq!(admin.number_blacklisted(10, s, 0, 0), expected);
            });
        }
    });
}
