//! Test doubles shared across the crate's unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{GetItemError, PutItemError, QueryError, ScanError, UpdateItemError};
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::output::{GetItemOutput, PutItemOutput, QueryOutput, ScanOutput, UpdateItemOutput};
use aws_sdk_dynamodb::types::SdkError;
use chrono::Utc;
use service_core::ddb::get_item::{GetItem, GetItemInput};
use service_core::ddb::put_item::{PutItem, PutItemInput};
use service_core::ddb::query::{Query, QueryInput};
use service_core::ddb::scan::{Scan, ScanInput};
use service_core::ddb::update_item::{UpdateItem, UpdateItemInput};
use uuid::Uuid;

use crate::category::repository::{
    CategoriesRepository, CreateCategoryError, GetCategoryError, ListCategoriesError, UpdateCategoryError,
};
use crate::category::types::Category;
use crate::course::repository::{
    CoursesRepository, CreateCourseError, GetCourseError, ListCoursesError, UpdateCourseError,
};
use crate::course::types::Course;
use crate::enrollment::repository::{
    CreateEnrollment, CreateEnrollmentError, EnrollmentsRepository, GetEnrollmentError, ListEnrollmentsError,
    UpdateEnrollmentError,
};
use crate::enrollment::types::Enrollment;
use crate::user::repository::{CreateUserError, GetUserError, UpdateUserError, UsersRepository};
use crate::user::types::User;

type Item = HashMap<String, AttributeValue>;

/// Replays canned read outputs and records every write input, so tests can
/// assert on the exact expressions a repository sends to the store.
#[derive(Default)]
pub(crate) struct CannedDdb {
    canned_get_items: Mutex<VecDeque<Option<Item>>>,
    canned_queries: Mutex<VecDeque<(Vec<Item>, Option<Item>)>>,
    canned_scans: Mutex<VecDeque<(Vec<Item>, Option<Item>)>>,

    pub captured_puts: Mutex<Vec<PutItemInput>>,
    pub captured_queries: Mutex<Vec<QueryInput>>,
    pub captured_scans: Mutex<Vec<ScanInput>>,
    pub captured_updates: Mutex<Vec<UpdateItemInput>>,
}

impl CannedDdb {
    pub fn push_get_item(&self, item: Option<Item>) {
        self.canned_get_items.lock().unwrap().push_back(item);
    }

    pub fn push_query(&self, items: Vec<Item>, last_evaluated_key: Option<Item>) {
        self.canned_queries.lock().unwrap().push_back((items, last_evaluated_key));
    }

    pub fn push_scan(&self, items: Vec<Item>, last_evaluated_key: Option<Item>) {
        self.canned_scans.lock().unwrap().push_back((items, last_evaluated_key));
    }
}

#[async_trait]
impl GetItem for &CannedDdb {
    async fn get_item(&self, _input: GetItemInput) -> Result<GetItemOutput, SdkError<GetItemError>> {
        let item = self.canned_get_items.lock().unwrap().pop_front().flatten();
        Ok(GetItemOutput::builder().set_item(item).build())
    }
}

#[async_trait]
impl PutItem for &CannedDdb {
    async fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, SdkError<PutItemError>> {
        self.captured_puts.lock().unwrap().push(input);
        Ok(PutItemOutput::builder().build())
    }
}

#[async_trait]
impl Query for &CannedDdb {
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, SdkError<QueryError>> {
        self.captured_queries.lock().unwrap().push(input);
        let (items, last_evaluated_key) = self.canned_queries.lock().unwrap().pop_front().unwrap_or_default();
        Ok(QueryOutput::builder()
            .set_items(Some(items))
            .set_last_evaluated_key(last_evaluated_key)
            .build())
    }
}

#[async_trait]
impl Scan for &CannedDdb {
    async fn scan(&self, input: ScanInput) -> Result<ScanOutput, SdkError<ScanError>> {
        self.captured_scans.lock().unwrap().push(input);
        let (items, last_evaluated_key) = self.canned_scans.lock().unwrap().pop_front().unwrap_or_default();
        Ok(ScanOutput::builder()
            .set_items(Some(items))
            .set_last_evaluated_key(last_evaluated_key)
            .build())
    }
}

#[async_trait]
impl UpdateItem for &CannedDdb {
    async fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, SdkError<UpdateItemError>> {
        self.captured_updates.lock().unwrap().push(input);
        Ok(UpdateItemOutput::builder().build())
    }
}

/// In-memory [`EnrollmentsRepository`] with the same uniqueness semantics
/// as the store-backed one.
#[derive(Default)]
pub(crate) struct InMemoryEnrollments {
    enrollments: Mutex<HashMap<Uuid, Enrollment>>,
}

impl InMemoryEnrollments {
    pub fn with(enrollments: impl IntoIterator<Item = Enrollment>) -> Self {
        Self {
            enrollments: Mutex::new(
                enrollments
                    .into_iter()
                    .map(|enrollment| (enrollment.enrollment_id, enrollment))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl EnrollmentsRepository for InMemoryEnrollments {
    async fn create(&self, user_id: &str, course_id: &str) -> Result<CreateEnrollment, CreateEnrollmentError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        let enrollment_id = Enrollment::id_for(user_id, course_id);
        if let Some(existing) = enrollments.get(&enrollment_id) {
            return Ok(CreateEnrollment::AlreadyEnrolled(existing.clone()));
        }

        let enrollment = Enrollment::new(user_id, course_id);
        enrollments.insert(enrollment_id, enrollment.clone());
        Ok(CreateEnrollment::Created(enrollment))
    }

    async fn get(&self, enrollment_id: &Uuid) -> Result<Enrollment, GetEnrollmentError> {
        self.enrollments
            .lock()
            .unwrap()
            .get(enrollment_id)
            .cloned()
            .ok_or(GetEnrollmentError::NotFound)
    }

    async fn get_for(&self, user_id: &str, course_id: &str) -> Result<Option<Enrollment>, GetEnrollmentError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .get(&Enrollment::id_for(user_id, course_id))
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Enrollment>, ListEnrollmentsError> {
        let mut enrollments: Vec<_> = self
            .enrollments
            .lock()
            .unwrap()
            .values()
            .filter(|enrollment| enrollment.user_id == user_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(enrollments)
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>, ListEnrollmentsError> {
        Ok(self.enrollments.lock().unwrap().values().cloned().collect())
    }

    async fn save_progress(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        self.replace(enrollment)
    }

    async fn complete(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        self.replace(enrollment)
    }

    async fn save_review(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        self.replace(enrollment)
    }
}

impl InMemoryEnrollments {
    fn replace(&self, enrollment: &Enrollment) -> Result<(), UpdateEnrollmentError> {
        let mut enrollments = self.enrollments.lock().unwrap();
        if !enrollments.contains_key(&enrollment.enrollment_id) {
            return Err(UpdateEnrollmentError::NotFound);
        }
        enrollments.insert(enrollment.enrollment_id, enrollment.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUsers {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUsers {
    pub fn with(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|user| (user.uid.clone(), user)).collect()),
        }
    }

    pub fn snapshot(&self, uid: &str) -> Option<User> {
        self.users.lock().unwrap().get(uid).cloned()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsers {
    async fn create(&self, user: &User) -> Result<(), CreateUserError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.uid) {
            return Err(CreateUserError::DuplicateUser);
        }
        users.insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn get(&self, uid: &str) -> Result<User, GetUserError> {
        self.users.lock().unwrap().get(uid).cloned().ok_or(GetUserError::NotFound)
    }

    async fn save(&self, user: &User) -> Result<(), UpdateUserError> {
        self.users.lock().unwrap().insert(user.uid.clone(), user.clone());
        Ok(())
    }

    async fn increment_enrollment_count(&self, uid: &str) -> Result<(), UpdateUserError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(uid).ok_or(UpdateUserError::NotFound)?;
        user.enrollment_count += 1;
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn record_completion(&self, uid: &str, learning_time: u32) -> Result<(), UpdateUserError> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(uid).ok_or(UpdateUserError::NotFound)?;
        user.stats.courses_completed += 1;
        user.stats.total_learning_time += learning_time;
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCourses {
    courses: Mutex<HashMap<String, Course>>,
}

impl InMemoryCourses {
    pub fn with(courses: impl IntoIterator<Item = Course>) -> Self {
        Self {
            courses: Mutex::new(
                courses
                    .into_iter()
                    .map(|course| (course.course_id.clone(), course))
                    .collect(),
            ),
        }
    }

    pub fn snapshot(&self, course_id: &str) -> Option<Course> {
        self.courses.lock().unwrap().get(course_id).cloned()
    }
}

#[async_trait]
impl CoursesRepository for InMemoryCourses {
    async fn create(&self, course: &Course) -> Result<(), CreateCourseError> {
        self.courses
            .lock()
            .unwrap()
            .insert(course.course_id.clone(), course.clone());
        Ok(())
    }

    async fn get(&self, course_id: &str) -> Result<Course, GetCourseError> {
        self.courses
            .lock()
            .unwrap()
            .get(course_id)
            .cloned()
            .ok_or(GetCourseError::NotFound)
    }

    async fn list_published(&self) -> Result<Vec<Course>, ListCoursesError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .values()
            .filter(|course| course.is_published)
            .cloned()
            .collect())
    }

    async fn increment_students_count(&self, course_id: &str) -> Result<(), UpdateCourseError> {
        let mut courses = self.courses.lock().unwrap();
        let course = courses.get_mut(course_id).ok_or(UpdateCourseError::NotFound)?;
        course.students_count += 1;
        course.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCategories {
    categories: Mutex<HashMap<String, Category>>,
}

impl InMemoryCategories {
    pub fn with(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: Mutex::new(
                categories
                    .into_iter()
                    .map(|category| (category.category_id.clone(), category))
                    .collect(),
            ),
        }
    }

    pub fn snapshot(&self, category_id: &str) -> Option<Category> {
        self.categories.lock().unwrap().get(category_id).cloned()
    }
}

#[async_trait]
impl CategoriesRepository for InMemoryCategories {
    async fn create(&self, category: &Category) -> Result<(), CreateCategoryError> {
        self.categories
            .lock()
            .unwrap()
            .insert(category.category_id.clone(), category.clone());
        Ok(())
    }

    async fn get(&self, category_id: &str) -> Result<Category, GetCategoryError> {
        self.categories
            .lock()
            .unwrap()
            .get(category_id)
            .cloned()
            .ok_or(GetCategoryError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Category>, ListCategoriesError> {
        Ok(self.categories.lock().unwrap().values().cloned().collect())
    }

    async fn increment_courses_count(&self, category_id: &str) -> Result<(), UpdateCategoryError> {
        let mut categories = self.categories.lock().unwrap();
        let category = categories.get_mut(category_id).ok_or(UpdateCategoryError::NotFound)?;
        category.courses_count += 1;
        category.updated_at = Utc::now();
        Ok(())
    }
}
