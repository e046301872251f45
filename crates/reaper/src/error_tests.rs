use super::*;

#[test]
fn io_and_json_errors_classify_as_internal() {
    let io = ReaperError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
    assert_eq!(io.kind(), ErrorKind::Internal);

    let json = serde_json::from_str::<MissionStoreTestDoc>("not json").unwrap_err();
    assert_eq!(ReaperError::Json(json).kind(), ErrorKind::Internal);
}

#[derive(Debug, serde::Deserialize)]
struct MissionStoreTestDoc {
    #[allow(dead_code)]
    field: String,
}
