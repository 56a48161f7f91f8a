mod common;

use common::{at, dial_entry};
use solace_instruments::{AssessmentTypeKey, Catalog, CatalogError};
use solace_engine::repository::{
    AssessmentHistoryRepository, AssessmentTypeRepository, InMemoryHistory, RepositoryError,
    begin, record,
};
use solace_engine::EngineError;

#[test]
fn catalog_serves_assessment_types() {
    let catalog = Catalog::builtin();
    let gad7 = AssessmentTypeRepository::get(&catalog, &AssessmentTypeKey::Name("GAD7".into()))
        .unwrap();
    assert_eq!(gad7.questions.len(), 7);
    assert_eq!(gad7.max_score, 21);

    let err = AssessmentTypeRepository::get(&catalog, &AssessmentTypeKey::Name("BDI2".into()))
        .unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Catalog(CatalogError::UnknownAssessment(_))
    ));
}

#[test]
fn begin_then_record_round_trip() {
    let catalog = Catalog::builtin();
    let history = InMemoryHistory::new();

    let mut session = begin(
        &catalog,
        "client-7",
        &AssessmentTypeKey::Name("GAD7".into()),
        at("2026-05-01T10:00:00Z"),
    )
    .unwrap();
    assert_eq!(session.status(), "in_progress");
    for i in 0..7 {
        session = session.answer(i, 2).unwrap();
    }
    let submitted = session.submit(at("2026-05-01T10:03:00Z")).unwrap();

    let completed = record(&history, &submitted).unwrap();
    assert_eq!(completed.total_score(), 14);

    let listed = history.list_for("client-7").unwrap();
    assert_eq!(listed, vec![completed]);
    assert!(history.list_for("someone-else").unwrap().is_empty());
}

#[test]
fn begin_with_unknown_type_fails() {
    let err = begin(
        &Catalog::builtin(),
        "client-7",
        &AssessmentTypeKey::Id("bdi2".into()),
        at("2026-05-01T10:00:00Z"),
    )
    .unwrap_err();
    assert!(matches!(err, EngineError::Repository(RepositoryError::Catalog(_))));
    assert!(!err.is_recoverable());
}

#[test]
fn only_submitted_sessions_are_recorded() {
    let history = InMemoryHistory::new();
    let session = begin(
        &Catalog::builtin(),
        "client-7",
        &AssessmentTypeKey::Name("PHQ9".into()),
        at("2026-05-01T10:00:00Z"),
    )
    .unwrap();
    let err = record(&history, &session).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Repository(RepositoryError::NotSubmitted("in_progress"))
    ));
    assert!(history.list_for("client-7").unwrap().is_empty());
}

#[test]
fn history_never_replaces_records() {
    let history = InMemoryHistory::new();
    let entry = dial_entry("DIAL", 10, 3, "2026-05-01T10:00:00Z");
    history.append(entry.clone()).unwrap();

    let err = history.append(entry.clone()).unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyRecorded(id) if id == entry.id()));
    assert_eq!(history.list_for("client-1").unwrap().len(), 1);

    history
        .append(dial_entry("DIAL", 10, 5, "2026-05-02T10:00:00Z"))
        .unwrap();
    assert_eq!(history.list_for("client-1").unwrap().len(), 2);
}
