mod common;

use common::MemoryConnection;
use docrepo::doc;
use docrepo::document::{Document, DOC_ID};
use docrepo::errors::{ErrorKind, RepoError, RepoResult};
use docrepo::filter::{all, field};
use docrepo::options::{limit_to, skip_by};
use docrepo::repository::{DocumentModel, TypedRepository};

#[derive(Debug, PartialEq)]
struct Note {
    val: i32,
}

impl DocumentModel for Note {
    fn to_document(&self) -> RepoResult<Document> {
        Ok(doc! { val: (self.val) })
    }

    fn from_document(document: &Document) -> RepoResult<Self> {
        let val = document
            .get("val")
            .as_i32()
            .copied()
            .ok_or_else(|| RepoError::new("missing field 'val'", ErrorKind::ObjectMappingError))?;
        Ok(Note { val })
    }
}

fn seeded_repository(connection: &std::sync::Arc<MemoryConnection>) -> TypedRepository<Note> {
    connection.seed(
        "testdb",
        "notes",
        vec![doc! { "_id": "a", val: 1 }, doc! { "_id": "b", val: 2 }],
    );
    TypedRepository::new(connection.clone(), "testdb", "notes")
}

#[tokio::test]
async fn test_find_by_id_returns_the_matching_document() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    let note = repository.find_by_id("a").await.unwrap();
    assert_eq!(note, Note { val: 1 });

    let note = repository.find_by_id("b").await.unwrap();
    assert_eq!(note, Note { val: 2 });
}

#[tokio::test]
async fn test_find_by_id_missing_is_not_found() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    let result = repository.find_by_id("c").await;
    assert!(result.is_err());
    assert_eq!(result.err().unwrap().kind(), &ErrorKind::NotFound);
}

#[tokio::test]
async fn test_find_one_by_field() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    let note = repository.find_one(field("val").eq(2)).await.unwrap();
    assert_eq!(note, Note { val: 2 });
}

#[tokio::test]
async fn test_find_one_empty_is_error_but_find_many_empty_is_ok() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);
    let unmatched = field("val").eq(99);

    let one = repository.find_one(unmatched.clone()).await;
    assert_eq!(one.err().unwrap().kind(), &ErrorKind::NotFound);

    let many = repository.find_many(unmatched).await.unwrap();
    assert!(many.is_empty());
}

#[tokio::test]
async fn test_find_many_drains_all_matches() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    let notes = repository.find_many(all()).await.unwrap();
    assert_eq!(notes, vec![Note { val: 1 }, Note { val: 2 }]);
}

#[tokio::test]
async fn test_find_many_with_skip_and_limit() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    let notes = repository
        .find_many_with_options(all(), &skip_by(1))
        .await
        .unwrap();
    assert_eq!(notes, vec![Note { val: 2 }]);

    let notes = repository
        .find_many_with_options(all(), &limit_to(1))
        .await
        .unwrap();
    assert_eq!(notes, vec![Note { val: 1 }]);
}

#[tokio::test]
async fn test_insert_one_round_trips_through_the_store() {
    let connection = MemoryConnection::new();
    let repository: TypedRepository<Note> =
        TypedRepository::new(connection.clone(), "testdb", "notes");

    let note = Note { val: 42 };
    let record = repository.insert_one(&note).await.unwrap();
    assert_eq!(record.base(), &note);

    let fetched = repository.find_by_id(&record.id().to_hex()).await.unwrap();
    assert_eq!(fetched, note);
}

#[tokio::test]
async fn test_insert_many_assigns_distinct_ids_in_order() {
    let connection = MemoryConnection::new();
    let repository: TypedRepository<Note> =
        TypedRepository::new(connection.clone(), "testdb", "notes");

    let notes = vec![Note { val: 1 }, Note { val: 2 }, Note { val: 3 }];
    let records = repository.insert_many(&notes).await.unwrap();

    assert_eq!(records.len(), 3);
    for (record, note) in records.iter().zip(&notes) {
        assert_eq!(record.base(), note);
    }
    assert_ne!(records[0].id(), records[1].id());
    assert_ne!(records[1].id(), records[2].id());

    // every record is fetchable under its own id
    for record in &records {
        let fetched = repository.find_by_id(&record.id().to_hex()).await.unwrap();
        assert_eq!(&fetched, record.base());
    }
}

#[tokio::test]
async fn test_insert_many_empty_input_returns_empty_output() {
    let connection = MemoryConnection::new();
    let repository: TypedRepository<Note> =
        TypedRepository::new(connection.clone(), "testdb", "notes");

    let records = repository.insert_many(&[]).await.unwrap();
    assert!(records.is_empty());
    assert!(connection.stored("testdb", "notes").is_empty());
}

#[tokio::test]
async fn test_transport_errors_propagate_unchanged() {
    let connection = MemoryConnection::new();
    let repository = seeded_repository(&connection);

    connection.fail_next();
    let result = repository.find_by_id("a").await;
    assert_eq!(result.err().unwrap().kind(), &ErrorKind::ConnectionError);

    connection.fail_next();
    let result = repository.find_many(all()).await;
    assert_eq!(result.err().unwrap().kind(), &ErrorKind::ConnectionError);

    connection.fail_next();
    let result = repository.insert_one(&Note { val: 1 }).await;
    assert_eq!(result.err().unwrap().kind(), &ErrorKind::ConnectionError);

    connection.fail_next();
    let result = repository.insert_many(&[Note { val: 1 }]).await;
    assert_eq!(result.err().unwrap().kind(), &ErrorKind::ConnectionError);
}

#[tokio::test]
async fn test_repositories_are_isolated_by_collection() {
    let connection = MemoryConnection::new();
    let notes: TypedRepository<Note> =
        TypedRepository::new(connection.clone(), "testdb", "notes");
    let archive: TypedRepository<Note> =
        TypedRepository::new(connection.clone(), "testdb", "archive");

    notes.insert_one(&Note { val: 1 }).await.unwrap();

    let found = archive.find_many(all()).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_untyped_repository_over_raw_documents() {
    let connection = MemoryConnection::new();
    let repository: TypedRepository<Document> =
        TypedRepository::new(connection.clone(), "testdb", "raw");

    let event = doc! { kind: "event", payload: { code: 7 } };
    let record = repository.insert_one(&event).await.unwrap();

    let fetched = repository.find_by_id(&record.id().to_hex()).await.unwrap();
    assert_eq!(fetched.get("kind").as_string().unwrap(), "event");
    assert!(fetched.contains_key(DOC_ID));
}
