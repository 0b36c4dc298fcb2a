//! Expense service
//!
//! Sits between the HTTP handlers and the store. Maps entities to transfer
//! objects and owns "not found" semantics: the store's `update` and `delete`
//! do not report whether anything matched, so both operations fetch first
//! and only mutate when the fetch found an expense.
//!
//! The fetch and the mutation are separate store calls. A concurrent delete
//! landing between them turns the mutation into a silent no-op and the
//! request still reports success (last write wins, no conflict detection).

use crate::dto::{CreateExpenseDto, ExpenseDto, UpdateExpenseDto};
use crate::error::AppError;
use crate::models::{Expense, ExpenseId};
use crate::observer::{ExpenseObserver, Operation, TracingObserver};
use crate::store::ExpenseStore;
use std::sync::Arc;

/// Request-handling core for expenses
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
    observer: Arc<dyn ExpenseObserver>,
}

impl ExpenseService {
    /// Create a service that logs events through `tracing`
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self::with_observer(store, Arc::new(TracingObserver))
    }

    /// Create a service reporting to a custom observer
    pub fn with_observer(store: Arc<dyn ExpenseStore>, observer: Arc<dyn ExpenseObserver>) -> Self {
        Self { store, observer }
    }

    /// Get a single expense
    ///
    /// # Returns
    /// * `Ok(ExpenseDto)` - The expense
    /// * `Err(AppError::ExpenseNotFound)` - No expense has this ID
    pub async fn get_expense(&self, id: ExpenseId) -> Result<ExpenseDto, AppError> {
        let expense = self.fetch_existing(Operation::Get, id).await?;
        self.observer.retrieved(&expense);
        Ok(ExpenseDto::from(&expense))
    }

    /// List every expense (possibly none)
    pub async fn get_expenses(&self) -> Result<Vec<ExpenseDto>, AppError> {
        let expenses = self.store.list().await?;
        self.observer.listed(expenses.len());
        Ok(expenses.iter().map(ExpenseDto::from).collect())
    }

    /// Create a new expense with a fresh ID and the current timestamp
    ///
    /// The request is expected to be validated already.
    pub async fn create_expense(&self, request: CreateExpenseDto) -> Result<ExpenseDto, AppError> {
        let expense = Expense::new(request.category, request.price);
        self.store.create(&expense).await?;
        self.observer.created(&expense);
        Ok(ExpenseDto::from(&expense))
    }

    /// Replace category and price of an existing expense
    ///
    /// ID and date of expense are preserved.
    ///
    /// # Returns
    /// * `Ok(())` - Updated (no content)
    /// * `Err(AppError::ExpenseNotFound)` - No expense has this ID
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        request: UpdateExpenseDto,
    ) -> Result<(), AppError> {
        let existing = self.fetch_existing(Operation::Update, id).await?;
        let updated = existing.with_changes(request.category, request.price);
        self.store.update(&updated).await?;
        self.observer.updated(&existing, &updated);
        Ok(())
    }

    /// Delete an existing expense
    ///
    /// # Returns
    /// * `Ok(())` - Deleted (no content)
    /// * `Err(AppError::ExpenseNotFound)` - No expense has this ID
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), AppError> {
        let existing = self.fetch_existing(Operation::Delete, id).await?;
        self.store.delete(existing.id).await?;
        self.observer.deleted(&existing);
        Ok(())
    }

    async fn fetch_existing(&self, operation: Operation, id: ExpenseId) -> Result<Expense, AppError> {
        match self.store.get(id).await? {
            Some(expense) => Ok(expense),
            None => {
                self.observer.not_found(operation, id);
                Err(AppError::ExpenseNotFound(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryExpenseStore, StoreError};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl ExpenseObserver for RecordingObserver {
        fn retrieved(&self, expense: &Expense) {
            self.push(format!("retrieved {}", expense.category));
        }
        fn created(&self, expense: &Expense) {
            self.push(format!("created {}", expense.category));
        }
        fn updated(&self, before: &Expense, after: &Expense) {
            self.push(format!("updated {} -> {}", before.category, after.category));
        }
        fn deleted(&self, expense: &Expense) {
            self.push(format!("deleted {}", expense.category));
        }
        fn not_found(&self, operation: Operation, _id: ExpenseId) {
            self.push(format!("not_found {}", operation));
        }
    }

    /// Store whose `get` lets a concurrent delete land right after the lookup
    struct DeleteAfterGetStore {
        inner: InMemoryExpenseStore,
    }

    #[async_trait]
    impl ExpenseStore for DeleteAfterGetStore {
        async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
            let found = self.inner.get(id).await?;
            self.inner.delete(id).await?;
            Ok(found)
        }
        async fn list(&self) -> Result<Vec<Expense>, StoreError> {
            self.inner.list().await
        }
        async fn create(&self, expense: &Expense) -> Result<(), StoreError> {
            self.inner.create(expense).await
        }
        async fn update(&self, expense: &Expense) -> Result<(), StoreError> {
            self.inner.update(expense).await
        }
        async fn delete(&self, id: ExpenseId) -> Result<(), StoreError> {
            self.inner.delete(id).await
        }
    }

    fn create_test_service() -> (ExpenseService, Arc<RecordingObserver>) {
        let observer = Arc::new(RecordingObserver::default());
        let service =
            ExpenseService::with_observer(Arc::new(InMemoryExpenseStore::new()), observer.clone());
        (service, observer)
    }

    fn create_request(category: &str, price: i64) -> CreateExpenseDto {
        CreateExpenseDto {
            category: category.to_string(),
            price: Decimal::from(price),
        }
    }

    fn update_request(category: &str, price: i64) -> UpdateExpenseDto {
        UpdateExpenseDto {
            category: category.to_string(),
            price: Decimal::from(price),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = create_test_service();
        let created = service
            .create_expense(create_request("Food", 42))
            .await
            .unwrap();

        let age = Utc::now().signed_duration_since(created.date_of_expense);
        assert!(age.num_seconds() < 5);

        let fetched = service.get_expense(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.category, "Food");
        assert_eq!(fetched.price, Decimal::from(42));
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let (service, observer) = create_test_service();
        let id = Expense::generate_id();

        match service.get_expense(id).await {
            Err(AppError::ExpenseNotFound(missing)) => assert_eq!(missing, id),
            other => panic!("Expected ExpenseNotFound error, got: {:?}", other),
        }
        assert_eq!(observer.events(), vec!["not_found get"]);
    }

    #[tokio::test]
    async fn test_get_expenses_empty() {
        let (service, _) = create_test_service();
        assert!(service.get_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_expenses_maps_all() {
        let (service, _) = create_test_service();
        let food = service.create_expense(create_request("Food", 42)).await.unwrap();
        let rent = service.create_expense(create_request("Rent", 900)).await.unwrap();

        let all = service.get_expenses().await.unwrap();
        assert_eq!(all, vec![food, rent]);
    }

    #[tokio::test]
    async fn test_update_preserves_identity() {
        let (service, observer) = create_test_service();
        let created = service.create_expense(create_request("Food", 42)).await.unwrap();

        service
            .update_expense(created.id, update_request("Travel", 99))
            .await
            .unwrap();

        let fetched = service.get_expense(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.date_of_expense, created.date_of_expense);
        assert_eq!(fetched.category, "Travel");
        assert_eq!(fetched.price, Decimal::from(99));
        assert_eq!(
            observer.events(),
            vec!["created Food", "updated Food -> Travel", "retrieved Travel"]
        );
    }

    #[tokio::test]
    async fn test_update_unknown_has_no_side_effects() {
        let (service, observer) = create_test_service();
        let existing = service.create_expense(create_request("Food", 42)).await.unwrap();

        let result = service
            .update_expense(Expense::generate_id(), update_request("Travel", 99))
            .await;
        assert!(matches!(result, Err(AppError::ExpenseNotFound(_))));

        assert_eq!(service.get_expenses().await.unwrap(), vec![existing]);
        assert_eq!(observer.events(), vec!["created Food", "not_found update"]);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let (service, _) = create_test_service();
        let created = service.create_expense(create_request("Food", 42)).await.unwrap();

        service.delete_expense(created.id).await.unwrap();
        assert!(matches!(
            service.get_expense(created.id).await,
            Err(AppError::ExpenseNotFound(_))
        ));

        // Second delete reports not found, never a store failure
        assert!(matches!(
            service.delete_expense(created.id).await,
            Err(AppError::ExpenseNotFound(_))
        ));
        assert!(service.get_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_others() {
        let (service, _) = create_test_service();
        let existing = service.create_expense(create_request("Rent", 900)).await.unwrap();

        let result = service.delete_expense(Expense::generate_id()).await;
        assert!(matches!(result, Err(AppError::ExpenseNotFound(_))));
        assert_eq!(service.get_expenses().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_racing_delete_succeeds_silently() {
        let existing = Expense::new("Food".to_string(), Decimal::from(42));
        let store = DeleteAfterGetStore {
            inner: InMemoryExpenseStore::with_expenses(vec![existing.clone()]),
        };
        let service = ExpenseService::with_observer(
            Arc::new(store),
            Arc::new(crate::observer::NoopObserver),
        );

        // The lookup saw the expense, the replace then matched nothing
        service
            .update_expense(existing.id, update_request("Travel", 99))
            .await
            .unwrap();
        assert!(service.get_expenses().await.unwrap().is_empty());
    }
}
