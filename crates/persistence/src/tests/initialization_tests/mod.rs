// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other persistence test opens `Persistence::new_in_memory()`, so
//! connection setup and migrations are exercised throughout. These tests
//! cover isolation and the file-backed constructor.

use crate::tests::{at, create_test_student};
use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.insert_student(create_test_student("U1", at(9, 0)))
        .unwrap();

    let count1: usize = db1.list_students().unwrap().len();
    let count2: usize = db2.list_students().unwrap().len();

    assert_eq!(count1, 1, "db1 should have 1 student");
    assert_eq!(count2, 0, "db2 should have 0 students (isolated)");
}

#[test]
fn test_file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!(
        "attendance-init-test-{}.sqlite3",
        std::process::id()
    ));

    {
        let mut persistence = Persistence::new_with_file(&path).unwrap();
        persistence
            .insert_student(create_test_student("U1", at(9, 0)))
            .unwrap();
    }

    let mut reopened = Persistence::new_with_file(&path).unwrap();
    let students = reopened.list_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].usn, "U1");
    drop(reopened);

    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.clone().into_os_string();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}
