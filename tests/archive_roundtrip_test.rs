use psu_rs::{Psu, ENTRY_FIXED_SIZE};
use tempfile::NamedTempFile;

/// Helper: create a minimal save archive on disk
fn create_test_archive() -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    let mut psu = Psu::create("mygame");
    psu.write("icon.sys", vec![0u8; 10]).unwrap();
    psu.save(temp_file.path()).unwrap();
    temp_file
}

#[test]
fn test_end_to_end_scenario() {
    let temp_file = create_test_archive();

    // On the wire: three directories (512 each) plus one file entry whose
    // 10-byte content is padded out to a full 1024-byte page
    let data = std::fs::read(temp_file.path()).unwrap();
    assert_eq!(data.len(), 3 * ENTRY_FIXED_SIZE + ENTRY_FIXED_SIZE + 1024);

    // The file entry's size field holds the unpadded content length
    let size_offset = 3 * ENTRY_FIXED_SIZE + 4;
    let size = u32::from_le_bytes([
        data[size_offset],
        data[size_offset + 1],
        data[size_offset + 2],
        data[size_offset + 3],
    ]);
    assert_eq!(size, 10);

    let psu = Psu::load(temp_file.path()).unwrap();
    assert_eq!(psu.len(), 4);
    assert_eq!(psu.read("icon.sys").unwrap(), &[0u8; 10][..]);
    assert!(psu.is_directory("mygame").unwrap());
    assert!(psu.is_file("icon.sys").unwrap());
}

#[test]
fn test_read_modify_write_cycle() {
    let temp_file = create_test_archive();

    // Grow the file, then persist
    {
        let mut psu = Psu::load(temp_file.path()).unwrap();
        psu.write("icon.sys", vec![0xCD; 2000]).unwrap();
        psu.write("extra.bin", vec![1, 2, 3]).unwrap();
        psu.save(temp_file.path()).unwrap();
    }

    // Reopen and verify content plus recomputed directory sizes
    {
        let psu = Psu::load(temp_file.path()).unwrap();
        assert_eq!(psu.len(), 5);
        assert_eq!(psu.read("icon.sys").unwrap(), &[0xCD; 2000][..]);
        assert_eq!(psu.read("extra.bin").unwrap(), &[1, 2, 3]);
        assert_eq!(psu.get("mygame").unwrap().header().size, 4);
        assert_eq!(psu.get(".").unwrap().header().size, 0);
        assert_eq!(psu.get("..").unwrap().header().size, 0);
    }
}

#[test]
fn test_import_and_export() {
    let temp_file = create_test_archive();
    let dir = tempfile::tempdir().unwrap();

    let source = dir.path().join("savedata.bin");
    std::fs::write(&source, b"imported payload").unwrap();

    {
        let mut psu = Psu::load(temp_file.path()).unwrap();
        psu.import_file(&source, "savedata.bin").unwrap();
        psu.save(temp_file.path()).unwrap();
    }

    {
        let psu = Psu::load(temp_file.path()).unwrap();
        let exported = dir.path().join("exported.bin");
        psu.export_file("savedata.bin", &exported).unwrap();
        assert_eq!(std::fs::read(&exported).unwrap(), b"imported payload");
    }
}

#[test]
fn test_delete_persists() {
    let temp_file = create_test_archive();

    {
        let mut psu = Psu::load(temp_file.path()).unwrap();
        psu.delete("icon.sys").unwrap();
        psu.save(temp_file.path()).unwrap();
    }

    let psu = Psu::load(temp_file.path()).unwrap();
    assert_eq!(psu.len(), 3);
    assert!(!psu.has("icon.sys"));

    // Only the directory skeleton remains, 512 bytes per entry
    let data = std::fs::read(temp_file.path()).unwrap();
    assert_eq!(data.len(), 3 * ENTRY_FIXED_SIZE);
}

#[test]
fn test_reserved_fields_survive_rewrite() {
    let temp_file = NamedTempFile::new().unwrap();

    // Author an archive whose file header carries nonzero reserved fields
    {
        let mut psu = Psu::create("mygame");
        psu.write("icon.sys", vec![0u8; 10]).unwrap();
        {
            let mut entry = psu.delete("icon.sys").unwrap();
            let header = entry.header_mut();
            header.unk1 = 0x1111;
            header.unk2 = 0x2222;
            header.unk3 = 0x33333333;
            header.sector = 0x0400;
            psu.add(entry);
        }
        psu.save(temp_file.path()).unwrap();
    }

    // Load, touch an unrelated entry, save again
    {
        let mut psu = Psu::load(temp_file.path()).unwrap();
        psu.write("other.bin", vec![5; 5]).unwrap();
        psu.save(temp_file.path()).unwrap();
    }

    // The opaque fields came through both rewrites untouched
    let psu = Psu::load(temp_file.path()).unwrap();
    let header = psu.get("icon.sys").unwrap().header();
    assert_eq!(header.unk1, 0x1111);
    assert_eq!(header.unk2, 0x2222);
    assert_eq!(header.unk3, 0x33333333);
    assert_eq!(header.sector, 0x0400);
}
