//! In-process roster store.
//!
//! Implements the user, class, and student repository ports over a single
//! mutex-guarded state. Used by tests and by the server when no database URL
//! is configured; nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ClassroomRepository, RosterPersistenceError, StudentRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    ClassId, ClassName, Classroom, PasswordHash, Student, StudentDraft, StudentId, User, UserId,
    Username,
};

#[derive(Debug, Default)]
struct State {
    last_user_id: i32,
    last_class_id: i32,
    last_student_id: i32,
    users: BTreeMap<i32, User>,
    classes: BTreeMap<i32, Classroom>,
    students: BTreeMap<i32, Student>,
}

impl State {
    fn owns_class(&self, owner: UserId, class_id: ClassId) -> bool {
        self.classes
            .get(&class_id.get())
            .is_some_and(|class| class.owner() == owner)
    }

    fn reachable_student(&self, owner: UserId, id: StudentId) -> Option<&Student> {
        self.students
            .get(&id.get())
            .filter(|student| self.owns_class(owner, student.class_id()))
    }
}

fn next_id(counter: &mut i32) -> Option<i32> {
    *counter = counter.checked_add(1)?;
    Some(*counter)
}

/// Shared in-memory implementation of every roster repository port.
///
/// Identifiers are assigned sequentially from 1 per table. Deleting a class
/// removes its students under the same lock.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    state: Mutex<State>,
}

impl InMemoryRosterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }

    fn lock_roster(&self) -> Result<MutexGuard<'_, State>, RosterPersistenceError> {
        self.lock().map_err(RosterPersistenceError::query)
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.lock().map(|state| state.users.len()).unwrap_or_default()
    }

    /// Number of stored classes across all owners.
    pub fn class_count(&self) -> usize {
        self.lock().map(|state| state.classes.len()).unwrap_or_default()
    }

    /// Number of stored students across all classes.
    pub fn student_count(&self) -> usize {
        self.lock()
            .map(|state| state.students.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRosterStore {
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state
            .users
            .values()
            .any(|user| user.username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_str()));
        }
        let id = next_id(&mut state.last_user_id)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        let user = User::new(UserId::new(id), username.clone(), password_hash.clone());
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id.get()).cloned())
    }
}

#[async_trait]
impl ClassroomRepository for InMemoryRosterStore {
    async fn list_owned(&self, owner: UserId) -> Result<Vec<Classroom>, RosterPersistenceError> {
        let state = self.lock_roster()?;
        Ok(state
            .classes
            .values()
            .filter(|class| class.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        owner: UserId,
        name: &ClassName,
    ) -> Result<Classroom, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        let id = next_id(&mut state.last_class_id)
            .ok_or_else(|| RosterPersistenceError::query("class id space exhausted"))?;
        let class = Classroom::new(ClassId::new(id), owner, name.clone());
        state.classes.insert(id, class.clone());
        Ok(class)
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: ClassId,
    ) -> Result<Option<Classroom>, RosterPersistenceError> {
        let state = self.lock_roster()?;
        Ok(state
            .classes
            .get(&id.get())
            .filter(|class| class.owner() == owner)
            .cloned())
    }

    async fn rename_owned(
        &self,
        owner: UserId,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Classroom>, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        let Some(slot) = state
            .classes
            .get_mut(&id.get())
            .filter(|class| class.owner() == owner)
        else {
            return Ok(None);
        };
        *slot = Classroom::new(id, owner, name.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: ClassId,
    ) -> Result<bool, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        if !state.owns_class(owner, id) {
            return Ok(false);
        }
        state.classes.remove(&id.get());
        state.students.retain(|_, student| student.class_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl StudentRepository for InMemoryRosterStore {
    async fn list_in_class(
        &self,
        owner: UserId,
        class_id: ClassId,
    ) -> Result<Vec<Student>, RosterPersistenceError> {
        let state = self.lock_roster()?;
        if !state.owns_class(owner, class_id) {
            return Ok(Vec::new());
        }
        Ok(state
            .students
            .values()
            .filter(|student| student.class_id() == class_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        class_id: ClassId,
        draft: &StudentDraft,
    ) -> Result<Student, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        if !state.classes.contains_key(&class_id.get()) {
            return Err(RosterPersistenceError::query(
                "student references a missing class",
            ));
        }
        let id = next_id(&mut state.last_student_id)
            .ok_or_else(|| RosterPersistenceError::query("student id space exhausted"))?;
        let student = Student::new(StudentId::new(id), class_id, draft.clone());
        state.students.insert(id, student.clone());
        Ok(student)
    }

    async fn find_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<Option<Student>, RosterPersistenceError> {
        let state = self.lock_roster()?;
        Ok(state.reachable_student(owner, id).cloned())
    }

    async fn update_owned(
        &self,
        owner: UserId,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<Option<Student>, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        let Some(class_id) = state
            .reachable_student(owner, id)
            .map(Student::class_id)
        else {
            return Ok(None);
        };
        let updated = Student::new(id, class_id, draft.clone());
        state.students.insert(id.get(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        id: StudentId,
    ) -> Result<bool, RosterPersistenceError> {
        let mut state = self.lock_roster()?;
        if state.reachable_student(owner, id).is_none() {
            return Ok(false);
        }
        state.students.remove(&id.get());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Age, StudentName};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryRosterStore {
        InMemoryRosterStore::new()
    }

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    fn class_name(raw: &str) -> ClassName {
        ClassName::new(raw).expect("valid class name")
    }

    fn draft(name: &str, age: i32) -> StudentDraft {
        StudentDraft::new(StudentName::new(name).expect("valid name"), Age::new(age))
    }

    async fn register(store: &InMemoryRosterStore, name: &str) -> UserId {
        UserRepository::create(store, &username(name), &PasswordHash::new("hash"))
            .await
            .expect("user created")
            .id()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected(store: InMemoryRosterStore) {
        register(&store, "ada").await;
        let err = UserRepository::create(&store, &username("ada"), &PasswordHash::new("other"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::duplicate_username("ada"));
        assert_eq!(store.user_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn classes_are_scoped_to_their_owner(store: InMemoryRosterStore) {
        let ada = register(&store, "ada").await;
        let bob = register(&store, "bob").await;
        let class = ClassroomRepository::create(&store, ada, &class_name("Algebra"))
            .await
            .expect("class created");

        assert!(store.list_owned(bob).await.expect("list").is_empty());
        assert!(
            ClassroomRepository::find_owned(&store, bob, class.id())
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(
            store
                .rename_owned(bob, class.id(), &class_name("Stolen"))
                .await
                .expect("rename")
                .is_none()
        );
        assert!(
            !ClassroomRepository::delete_owned(&store, bob, class.id())
                .await
                .expect("delete")
        );
        assert_eq!(store.list_owned(ada).await.expect("list"), vec![class]);
    }

    #[rstest]
    #[tokio::test]
    async fn students_are_reachable_only_through_owned_classes(store: InMemoryRosterStore) {
        let ada = register(&store, "ada").await;
        let bob = register(&store, "bob").await;
        let class = ClassroomRepository::create(&store, ada, &class_name("Algebra"))
            .await
            .expect("class created");
        let student = StudentRepository::create(&store, class.id(), &draft("Lin", 11))
            .await
            .expect("student created");

        assert!(
            StudentRepository::find_owned(&store, bob, student.id())
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(
            store
                .update_owned(bob, student.id(), &draft("Mallory", 1))
                .await
                .expect("update")
                .is_none()
        );
        assert!(
            store
                .list_in_class(bob, class.id())
                .await
                .expect("list")
                .is_empty()
        );
        let updated = store
            .update_owned(ada, student.id(), &draft("Lin", 12))
            .await
            .expect("update")
            .expect("reachable");
        assert_eq!(updated.age(), Age::new(12));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_class_removes_its_students(store: InMemoryRosterStore) {
        let ada = register(&store, "ada").await;
        let keep = ClassroomRepository::create(&store, ada, &class_name("Keep"))
            .await
            .expect("class created");
        let doomed = ClassroomRepository::create(&store, ada, &class_name("Drop"))
            .await
            .expect("class created");
        StudentRepository::create(&store, keep.id(), &draft("A", 9))
            .await
            .expect("student");
        StudentRepository::create(&store, doomed.id(), &draft("B", 9))
            .await
            .expect("student");
        StudentRepository::create(&store, doomed.id(), &draft("C", 9))
            .await
            .expect("student");

        assert!(
            ClassroomRepository::delete_owned(&store, ada, doomed.id())
                .await
                .expect("delete")
        );
        assert_eq!(store.student_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_ascend_from_one(store: InMemoryRosterStore) {
        let ada = register(&store, "ada").await;
        assert_eq!(ada, UserId::new(1));
        let first = ClassroomRepository::create(&store, ada, &class_name("One"))
            .await
            .expect("class");
        let second = ClassroomRepository::create(&store, ada, &class_name("Two"))
            .await
            .expect("class");
        assert!(first.id() < second.id());
        let listed: Vec<_> = store
            .list_owned(ada)
            .await
            .expect("list")
            .iter()
            .map(Classroom::id)
            .collect();
        assert_eq!(listed, vec![first.id(), second.id()]);
    }
}
