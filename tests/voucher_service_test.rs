use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use voucher_discount::core::VoucherId;
use voucher_discount::{
    Failure, FailureType, InMemoryVoucherStore, OrderDiscount, Result, Voucher, VoucherService,
    VoucherStore,
};

/// Wraps the in-memory store and counts every call made through the port.
#[derive(Clone, Default)]
struct RecordingStore {
    inner: InMemoryVoucherStore,
    reads: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
    uses: Arc<AtomicUsize>,
}

impl RecordingStore {
    fn seeded(vouchers: Vec<Voucher>) -> Self {
        Self {
            inner: InMemoryVoucherStore::with_vouchers(vouchers),
            ..Default::default()
        }
    }

    fn writes(&self) -> usize {
        self.creates.load(Ordering::SeqCst) + self.uses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoucherStore for RecordingStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_voucher_by_code(code).await
    }

    async fn create_voucher(&self, code: &str, discount: f64) -> Result<()> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_voucher(code, discount).await
    }

    async fn use_voucher(&self, id: VoucherId) -> Result<()> {
        self.uses.fetch_add(1, Ordering::SeqCst);
        self.inner.use_voucher(id).await
    }
}

fn test1(used: bool) -> Voucher {
    Voucher {
        id: 1,
        code: "test1".to_string(),
        discount: 10.0,
        used,
    }
}

fn conflict(message: &str) -> Failure {
    Failure {
        r#type: FailureType::Conflict,
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_create_existing_code_conflicts_for_any_discount() {
    let store = RecordingStore::seeded(vec![test1(false)]);
    let service = VoucherService::new(store.clone());

    for discount in [-1.0, 0.0, 1.0, 10.0, 50.5, 99.0, 100.0, 1000.0] {
        let err = service.create_voucher("test1", discount).await.unwrap_err();
        assert_eq!(err.failure(), Some(conflict("Voucher already exist.")));
    }

    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_create_out_of_range_discount_is_bad_request() {
    let store = RecordingStore::default();
    let service = VoucherService::new(store.clone());

    for discount in [f64::MIN, -50.0, 0.0, 0.99, 1.0, 100.0, 100.01, 250.0] {
        let err = service.create_voucher("fresh", discount).await.unwrap_err();
        assert_eq!(
            err.failure(),
            Some(Failure {
                r#type: FailureType::BadRequest,
                message: "Invalid discount value.".to_string(),
            })
        );
    }

    assert_eq!(store.writes(), 0);
    assert!(store.inner.is_empty().await);
}

#[tokio::test]
async fn test_create_valid_voucher_writes_once() {
    let store = RecordingStore::default();
    let service = VoucherService::new(store.clone());

    service.create_voucher("test1", 10.0).await.unwrap();

    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    assert_eq!(store.uses.load(Ordering::SeqCst), 0);

    let stored = store.inner.get_voucher_by_code("test1").await.unwrap().unwrap();
    assert_eq!(stored.discount, 10.0);
    assert!(!stored.used);
}

#[tokio::test]
async fn test_create_accepts_values_just_inside_bounds() {
    let service = VoucherService::new(RecordingStore::default());

    service.create_voucher("low", 1.01).await.unwrap();
    service.create_voucher("high", 99.99).await.unwrap();
}

#[tokio::test]
async fn test_apply_missing_code_conflicts_for_any_amount() {
    let store = RecordingStore::default();
    let service = VoucherService::new(store.clone());

    for amount in [0.0, 50.0, 100.0, 10_000.0] {
        let err = service.apply_voucher("test1", amount).await.unwrap_err();
        assert_eq!(err.failure(), Some(conflict("Voucher does not exist.")));
    }

    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_apply_below_threshold_does_not_consume_voucher() {
    let store = RecordingStore::seeded(vec![test1(false)]);
    let service = VoucherService::new(store.clone());

    let order = service.apply_voucher("test1", 50.0).await.unwrap();

    assert_eq!(
        order,
        OrderDiscount {
            amount: 50.0,
            discount: 10.0,
            final_amount: 50.0,
            applied: false,
        }
    );
    assert_eq!(store.writes(), 0);

    let stored = store.inner.get_voucher_by_code("test1").await.unwrap().unwrap();
    assert!(!stored.used);
}

#[tokio::test]
async fn test_apply_used_voucher_reports_nominal_discount() {
    let store = RecordingStore::seeded(vec![test1(true)]);
    let service = VoucherService::new(store.clone());

    for amount in [20.0, 100.0, 500.0] {
        let order = service.apply_voucher("test1", amount).await.unwrap();
        assert_eq!(order.amount, amount);
        assert_eq!(order.discount, 10.0);
        assert_eq!(order.final_amount, amount);
        assert!(!order.applied);
    }

    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_apply_at_threshold_discounts_and_marks_used() {
    let store = RecordingStore::seeded(vec![test1(false)]);
    let service = VoucherService::new(store.clone());

    let order = service.apply_voucher("test1", 100.0).await.unwrap();

    assert_eq!(
        order,
        OrderDiscount {
            amount: 100.0,
            discount: 10.0,
            final_amount: 90.0,
            applied: true,
        }
    );
    assert_eq!(store.uses.load(Ordering::SeqCst), 1);
    assert_eq!(store.creates.load(Ordering::SeqCst), 0);

    let stored = store.inner.get_voucher_by_code("test1").await.unwrap().unwrap();
    assert!(stored.used);
}

#[tokio::test]
async fn test_apply_final_amount_formula() {
    let store = RecordingStore::seeded(vec![Voucher {
        id: 3,
        code: "quarter".to_string(),
        discount: 25.0,
        used: false,
    }]);
    let service = VoucherService::new(store);

    let order = service.apply_voucher("quarter", 240.0).await.unwrap();

    assert_eq!(order.final_amount, 240.0 - 240.0 * (25.0 / 100.0));
    assert_eq!(order.final_amount, 180.0);
    assert!(order.applied);
}

#[tokio::test]
async fn test_apply_twice_only_discounts_once() {
    let store = RecordingStore::default();
    let service = VoucherService::new(store.clone());
    service.create_voucher("test1", 10.0).await.unwrap();

    let first = service.apply_voucher("test1", 150.0).await.unwrap();
    let second = service.apply_voucher("test1", 150.0).await.unwrap();

    assert!(first.applied);
    assert_eq!(first.final_amount, 135.0);
    assert!(!second.applied);
    assert_eq!(second.final_amount, 150.0);
    assert_eq!(second.discount, 10.0);
    assert_eq!(store.uses.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_apply_nan_amount_leaves_voucher_unused() {
    let store = RecordingStore::seeded(vec![test1(false)]);
    let service = VoucherService::new(store.clone());

    let amount: f64 = "NaN".parse().unwrap();
    let order = service.apply_voucher("test1", amount).await.unwrap();

    assert!(!order.applied);
    assert_eq!(order.discount, 10.0);
    assert_eq!(store.writes(), 0);

    let stored = store.inner.get_voucher_by_code("test1").await.unwrap().unwrap();
    assert!(!stored.used);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_in_memory_keep_first_record() {
    let store = InMemoryVoucherStore::new();
    let service = Arc::new(VoucherService::new(store.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.create_voucher("dup", 10.0 + i as f64).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.len().await, 1);
    let stored = store.get_voucher_by_code("dup").await.unwrap().unwrap();
    assert_eq!(stored.id, 1);
}

#[tokio::test]
async fn test_failure_json_shape() {
    let service = VoucherService::new(RecordingStore::default());

    let err = service.apply_voucher("nope", 100.0).await.unwrap_err();
    let body = serde_json::to_value(err.failure().unwrap()).unwrap();

    assert_eq!(
        body,
        serde_json::json!({"type": "conflict", "message": "Voucher does not exist."})
    );
}
