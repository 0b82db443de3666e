use folioapp::api::FolioApi;
use folioapp::codec::decode_pages;
use folioapp::model::PagePatch;
use folioapp::store::fs_backend::FsBackend;
use folioapp::sync::mem_transport::MemTransport;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> FolioApi<FsBackend, MemTransport> {
    FolioApi::open(FsBackend::new(dir.path().to_path_buf()), MemTransport::new()).unwrap()
}

#[test]
fn create_edit_reload_round_trip() {
    let dir = TempDir::new().unwrap();

    let id = {
        let mut api = open(&dir);
        let id = api.create_page(None, None).unwrap().affected_pages[0].id.clone();
        api.edit_page(&id, PagePatch::title("Groceries").with_content("milk\neggs"))
            .unwrap();
        id
    };

    let api = open(&dir);
    let page = api.notebook().get(&id).unwrap();
    assert_eq!(page.title, "Groceries");
    assert_eq!(page.content, "milk\neggs");
    assert_eq!(page.blocks.len(), 2);
    assert_eq!(api.notebook().len(), 2);
}

#[test]
fn blob_is_one_json_array_without_leftover_tmp_files() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    api.create_page(None, Some("Taxes".into())).unwrap();

    let raw = fs::read_to_string(dir.path().join("pages.json")).unwrap();
    let pages = decode_pages(&raw).unwrap();
    assert_eq!(pages.len(), 2);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn legacy_records_load_with_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pages.json"),
        r#"[{"id": "legacy-1", "title": "", "content": ""}]"#,
    )
    .unwrap();

    let api = open(&dir);
    let page = api.notebook().get("legacy-1").unwrap();
    assert_eq!(page.title, "Untitled");
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].text, "");
    assert!(!page.is_favorite);
}

#[test]
fn corrupt_blob_refuses_to_open_and_is_kept() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pages.json"), "{ truncated").unwrap();

    let result = FolioApi::open(FsBackend::new(dir.path().to_path_buf()), MemTransport::new());
    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(dir.path().join("pages.json")).unwrap(),
        "{ truncated"
    );
}
