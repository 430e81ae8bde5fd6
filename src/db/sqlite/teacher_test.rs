//! Tests for SqliteTeacherRepository.

use chrono::NaiveDate;

use super::helpers::write_error;

use crate::db::{
    Database, DbError, SqliteDatabase, TeacherDraft, TeacherId, TeacherQuery, TeacherRepository,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(first: &str, last: &str, employee_number: &str, hire_date: NaiveDate) -> TeacherDraft {
    TeacherDraft {
        id: None,
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        employee_number: Some(employee_number.to_string()),
        hire_date: Some(hire_date),
        salary: Some("50000".to_string()),
    }
}

async fn insert_course(db: &SqliteDatabase, teacher_id: Option<TeacherId>, name: &str) {
    sqlx::query("INSERT INTO courses (CourseCode, TeacherId, CourseName) VALUES (?, ?, ?)")
        .bind(format!("C-{}", name.len()))
        .bind(teacher_id)
        .bind(name)
        .execute(db.pool())
        .await
        .expect("Course insert should succeed");
}

async fn teacher_count(db: &SqliteDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

// =============================================================================
// create
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_id_and_get_returns_fields() {
    let db = setup_db().await;
    let repo = db.teachers();

    let created = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .expect("Create should succeed");
    assert!(created.id > 0);

    let fetched = repo.get(created.id).await.expect("Get should succeed");
    assert_eq!(fetched.first_name, "Ana");
    assert_eq!(fetched.last_name, "Lee");
    assert_eq!(fetched.employee_number, "E100");
    assert_eq!(fetched.hire_date, date(2020, 1, 10));
    assert_eq!(fetched.salary, "50000");
    assert!(fetched.course_names.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_ignores_draft_id() {
    let db = setup_db().await;
    let repo = db.teachers();

    let mut with_id = draft("Ana", "Lee", "E100", date(2020, 1, 10));
    with_id.id = Some(999);

    let created = repo.create(&with_id).await.unwrap();
    assert_ne!(created.id, 999);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_duplicate_employee_number_is_conflict() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let err = repo
        .create(&draft("Bo", "Kim", "E100", date(2021, 3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::AlreadyExists { .. }));
    assert_eq!(
        err.to_string(),
        "Teacher with employee number E100 already exists."
    );
    assert_eq!(teacher_count(&db).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_missing_field_inserts_nothing() {
    let db = setup_db().await;
    let repo = db.teachers();

    let mut missing_last = draft("Ana", "Lee", "E100", date(2020, 1, 10));
    missing_last.last_name = None;

    let err = repo.create(&missing_last).await.unwrap_err();
    match err {
        DbError::Validation { field, message } => {
            assert_eq!(field, "teacherLName");
            assert_eq!(message, "Teacher last name is required.");
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert_eq!(teacher_count(&db).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_with_same_employee_number_insert_one_row() {
    let db = setup_db().await;
    let first = db.teachers();
    let second = db.teachers();

    let a = draft("Ana", "Lee", "E100", date(2020, 1, 10));
    let b = draft("Bo", "Kim", "E100", date(2021, 3, 1));

    let (ra, rb) = tokio::join!(first.create(&a), second.create(&b));

    let successes = [ra.is_ok(), rb.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "Exactly one create should win");

    let loser = if ra.is_err() { ra } else { rb };
    assert!(matches!(loser, Err(DbError::AlreadyExists { .. })));
    assert_eq!(teacher_count(&db).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_maps_unique_violation_on_insert_to_already_exists() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    // The existence check compares case-sensitively, this index does not, so
    // only the INSERT itself can reject the second teacher.
    sqlx::query(
        "CREATE UNIQUE INDEX idx_teachers_employee_number_nocase \
         ON teachers (EmployeeNumber COLLATE NOCASE)",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let err = repo
        .create(&draft("Bo", "Kim", "e100", date(2021, 3, 1)))
        .await
        .unwrap_err();

    match err {
        DbError::AlreadyExists { message } => {
            assert_eq!(message, "Teacher with employee number e100 already exists.")
        }
        other => panic!("Expected AlreadyExists, got {:?}", other),
    }
    assert_eq!(teacher_count(&db).await, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn write_error_maps_only_unique_violations() {
    let db = setup_db().await;
    let insert = "INSERT INTO teachers (TeacherFName, TeacherLName, EmployeeNumber, HireDate, Salary) \
                  VALUES ('A', 'B', 'E1', '2020-01-01', '1')";

    sqlx::query(insert).execute(db.pool()).await.unwrap();
    let duplicate = sqlx::query(insert).execute(db.pool()).await.unwrap_err();
    assert!(matches!(
        write_error(duplicate, "E1"),
        DbError::AlreadyExists { .. }
    ));

    let not_null = sqlx::query("INSERT INTO teachers (TeacherFName) VALUES ('A')")
        .execute(db.pool())
        .await
        .unwrap_err();
    assert!(matches!(
        write_error(not_null, "E1"),
        DbError::Database { .. }
    ));
}

// =============================================================================
// get / courses
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn get_nonexistent_teacher_returns_not_found() {
    let db = setup_db().await;

    let result = db.teachers().get(12345).await;
    assert!(matches!(result, Err(DbError::NotFound { id: 12345, .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_returns_every_course_in_join_order() {
    let db = setup_db().await;
    let repo = db.teachers();

    let ana = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    let bo = repo
        .create(&draft("Bo", "Kim", "E200", date(2019, 6, 1)))
        .await
        .unwrap();

    insert_course(&db, Some(ana.id), "Web Application Development").await;
    insert_course(&db, Some(bo.id), "Database Development").await;
    insert_course(&db, Some(ana.id), "Project Management").await;
    insert_course(&db, Some(ana.id), "Client Side Scripting").await;
    insert_course(&db, None, "Unassigned Elective").await;

    let fetched = repo.get(ana.id).await.unwrap();
    assert_eq!(
        fetched.course_names,
        vec![
            "Web Application Development",
            "Project Management",
            "Client Side Scripting"
        ]
    );
    assert_eq!(fetched.first_name, "Ana");

    assert_eq!(
        repo.courses(ana.id).await.unwrap(),
        fetched.course_names,
        "courses() should agree with get()"
    );
    assert_eq!(
        repo.courses(bo.id).await.unwrap(),
        vec!["Database Development"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn undecodable_hire_date_is_database_error() {
    let db = setup_db().await;

    let result = sqlx::query(
        "INSERT INTO teachers (TeacherFName, TeacherLName, EmployeeNumber, HireDate, Salary) \
         VALUES ('Ana', 'Lee', 'E100', 'not-a-date', '50000')",
    )
    .execute(db.pool())
    .await
    .unwrap();
    let id = result.last_insert_rowid();

    let repo = db.teachers();
    assert!(matches!(
        repo.get(id).await,
        Err(DbError::Database { .. })
    ));
    assert!(matches!(
        repo.list(&TeacherQuery::default()).await,
        Err(DbError::Database { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn courses_for_unknown_teacher_is_empty() {
    let db = setup_db().await;
    let courses = db.teachers().courses(777).await.unwrap();
    assert!(courses.is_empty());
}

// =============================================================================
// list
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_returns_all_teachers_ordered_by_id_without_courses() {
    let db = setup_db().await;
    let repo = db.teachers();

    let ana = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    let bo = repo
        .create(&draft("Bo", "Kim", "E200", date(2015, 8, 22)))
        .await
        .unwrap();
    insert_course(&db, Some(ana.id), "Web Application Development").await;

    let teachers = repo.list(&TeacherQuery::default()).await.unwrap();
    let ids: Vec<TeacherId> = teachers.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![ana.id, bo.id]);
    assert!(
        teachers.iter().all(|t| t.course_names.is_empty()),
        "Plain listing leaves course lists empty"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_with_courses_folds_join_rows_per_teacher() {
    let db = setup_db().await;
    let repo = db.teachers();

    let ana = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    let bo = repo
        .create(&draft("Bo", "Kim", "E200", date(2015, 8, 22)))
        .await
        .unwrap();
    insert_course(&db, Some(ana.id), "Web Application Development").await;
    insert_course(&db, Some(ana.id), "Project Management").await;

    let query = TeacherQuery {
        with_courses: true,
        ..Default::default()
    };
    let teachers = repo.list(&query).await.unwrap();

    assert_eq!(teachers.len(), 2, "Join rows must not duplicate teachers");
    assert_eq!(teachers[0].id, ana.id);
    assert_eq!(
        teachers[0].course_names,
        vec!["Web Application Development", "Project Management"]
    );
    assert_eq!(teachers[1].id, bo.id);
    assert!(teachers[1].course_names.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_inclusive_hire_date_range() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Early", "One", "E1", date(2014, 12, 31)))
        .await
        .unwrap();
    repo.create(&draft("Start", "Two", "E2", date(2015, 1, 1)))
        .await
        .unwrap();
    repo.create(&draft("Middle", "Three", "E3", date(2016, 6, 15)))
        .await
        .unwrap();
    repo.create(&draft("End", "Four", "E4", date(2017, 12, 31)))
        .await
        .unwrap();
    repo.create(&draft("Late", "Five", "E5", date(2018, 1, 1)))
        .await
        .unwrap();

    let query = TeacherQuery {
        start: Some(date(2015, 1, 1)),
        end: Some(date(2017, 12, 31)),
        ..Default::default()
    };
    let names: Vec<String> = repo
        .list(&query)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.first_name)
        .collect();
    assert_eq!(names, vec!["Start", "Middle", "End"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_with_single_bound_returns_everything() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    repo.create(&draft("Bo", "Kim", "E200", date(2010, 1, 10)))
        .await
        .unwrap();

    let query = TeacherQuery {
        start: Some(date(2019, 1, 1)),
        ..Default::default()
    };
    assert_eq!(repo.list(&query).await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_with_inverted_range_is_empty() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let query = TeacherQuery {
        start: Some(date(2021, 1, 1)),
        end: Some(date(2019, 1, 1)),
        ..Default::default()
    };
    assert!(repo.list(&query).await.unwrap().is_empty());
}

// =============================================================================
// update
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites_every_column() {
    let db = setup_db().await;
    let repo = db.teachers();

    let created = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let changed = TeacherDraft {
        id: Some(created.id),
        first_name: Some("Anna".to_string()),
        last_name: Some("Li".to_string()),
        employee_number: Some("E101".to_string()),
        hire_date: Some(date(2021, 2, 3)),
        salary: Some("61000.50".to_string()),
    };
    repo.update(created.id, &changed)
        .await
        .expect("Update should succeed");

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.first_name, "Anna");
    assert_eq!(fetched.last_name, "Li");
    assert_eq!(fetched.employee_number, "E101");
    assert_eq!(fetched.hire_date, date(2021, 2, 3));
    assert_eq!(fetched.salary, "61000.50");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_nonexistent_teacher_returns_not_found_and_changes_nothing() {
    let db = setup_db().await;
    let repo = db.teachers();

    let existing = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let mut ghost = draft("Ghost", "Teacher", "E999", date(2020, 1, 10));
    ghost.id = Some(4242);

    let err = repo.update(4242, &ghost).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { id: 4242, .. }));

    let all = repo.list(&TeacherQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], existing);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_mismatched_id_is_rejected() {
    let db = setup_db().await;
    let repo = db.teachers();

    let created = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let mut other = draft("Anna", "Lee", "E100", date(2020, 1, 10));
    other.id = Some(created.id + 1);
    let err = repo.update(created.id, &other).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid teacher data or mismatched ID.");

    other.id = None;
    let err = repo.update(created.id, &other).await.unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }));

    assert_eq!(repo.get(created.id).await.unwrap().first_name, "Ana");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_to_taken_employee_number_is_conflict() {
    let db = setup_db().await;
    let repo = db.teachers();

    repo.create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    let bo = repo
        .create(&draft("Bo", "Kim", "E200", date(2019, 6, 1)))
        .await
        .unwrap();

    let mut steal = TeacherDraft::from(&bo);
    steal.employee_number = Some("E100".to_string());

    let err = repo.update(bo.id, &steal).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadyExists { .. }));
    assert_eq!(repo.get(bo.id).await.unwrap().employee_number, "E200");
}

// =============================================================================
// delete
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_exactly_one_row_once() {
    let db = setup_db().await;
    let repo = db.teachers();

    let ana = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    let bo = repo
        .create(&draft("Bo", "Kim", "E200", date(2019, 6, 1)))
        .await
        .unwrap();

    repo.delete(ana.id).await.expect("First delete should succeed");

    let second = repo.delete(ana.id).await;
    assert!(matches!(second, Err(DbError::NotFound { .. })));

    let remaining = repo.list(&TeacherQuery::default()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, bo.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_keeps_courses_but_unassigns_them() {
    let db = setup_db().await;
    let repo = db.teachers();

    let ana = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();
    insert_course(&db, Some(ana.id), "Web Application Development").await;

    repo.delete(ana.id).await.unwrap();

    let orphaned: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE TeacherId IS NULL")
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(orphaned, 1);
    assert!(repo.courses(ana.id).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_nonexistent_teacher_returns_not_found() {
    let db = setup_db().await;
    let result = db.teachers().delete(31337).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

// =============================================================================
// end to end
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn add_list_get_delete_round() {
    let db = setup_db().await;
    let repo = db.teachers();

    let created = repo
        .create(&draft("Ana", "Lee", "E100", date(2020, 1, 10)))
        .await
        .unwrap();

    let all = repo.list(&TeacherQuery::default()).await.unwrap();
    assert!(all.iter().any(|t| t.id == created.id));

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched, created);

    repo.delete(created.id).await.unwrap();
    assert!(matches!(
        repo.get(created.id).await,
        Err(DbError::NotFound { .. })
    ));
}
