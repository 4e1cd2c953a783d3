use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use water_delivery_tracker::dashboard::export::{Report, ReportKind};
use water_delivery_tracker::dashboard::filter::{DateRange, DeliveryFilter};
use water_delivery_tracker::error::AppError;
use water_delivery_tracker::forms::{DeliveryForm, DriverForm, FuelingForm, MaintenanceForm};
use water_delivery_tracker::models::customer::NewCustomer;
use water_delivery_tracker::models::driver::{Driver, NewDriver};
use water_delivery_tracker::models::session::Session;
use water_delivery_tracker::models::truck::NewTruck;
use water_delivery_tracker::notify::{Notification, Notifier, Severity};
use water_delivery_tracker::observability::metrics::Metrics;
use water_delivery_tracker::storage::{FileStorage, MemoryStorage, Storage, StorageKey};
use water_delivery_tracker::store::Store;

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }

    fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

fn setup() -> (Store, Arc<MemoryStorage>, Arc<RecordingNotifier>) {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let store = Store::open(storage.clone(), notifier.clone(), Metrics::new()).unwrap();
    (store, storage, notifier)
}

fn reopen(storage: &Arc<MemoryStorage>) -> Store {
    Store::open(
        storage.clone(),
        Arc::new(RecordingNotifier::default()),
        Metrics::new(),
    )
    .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn delivery_form(customer: &str, quantity: &str, date: NaiveDate) -> DeliveryForm {
    DeliveryForm {
        selected_customer_id: None,
        customer_name: customer.to_string(),
        address: "Rua A, 1".to_string(),
        delivery_date: Some(date),
        start_time: "08:00".to_string(),
        end_time: "09:00".to_string(),
        water_quantity: quantity.to_string(),
        truck_plate: "ABC-1234".to_string(),
        receiver_signature: "Carlos".to_string(),
        receiver_rg: "12.345.678-9".to_string(),
    }
}

#[test]
fn first_start_seeds_fleet_and_leaves_logs_empty() {
    let (store, storage, _notifier) = setup();

    let logins: Vec<(&str, &str)> = store
        .drivers()
        .iter()
        .map(|d| (d.username.as_str(), d.password.as_str()))
        .collect();
    assert_eq!(logins, vec![("joao", "123"), ("maria", "123")]);

    let plates: Vec<&str> = store.trucks().iter().map(|t| t.plate.as_str()).collect();
    assert_eq!(plates, vec!["ABC-1234", "XYZ-5678"]);
    assert_eq!(store.customers().len(), 2);

    assert!(store.deliveries().is_empty());
    assert!(store.fuelings().is_empty());
    assert!(store.maintenances().is_empty());
    assert!(store.session().is_anonymous());

    assert!(storage.load(StorageKey::Drivers).unwrap().is_some());
    assert!(storage.load(StorageKey::Trucks).unwrap().is_some());
    assert!(storage.load(StorageKey::Customers).unwrap().is_some());
    assert!(storage.load(StorageKey::Deliveries).unwrap().is_none());
    assert!(storage.load(StorageKey::Fuelings).unwrap().is_none());
    assert!(storage.load(StorageKey::Maintenances).unwrap().is_none());
}

#[test]
fn persisted_collections_win_over_seed() {
    let storage = Arc::new(MemoryStorage::new());
    storage.save(StorageKey::Drivers, "[]").unwrap();
    storage
        .save(StorageKey::Trucks, r#"[{"id":"t9","plate":"QQQ9999"}]"#)
        .unwrap();

    let store = reopen(&storage);

    assert!(store.drivers().is_empty());
    assert_eq!(store.trucks().len(), 1);
    assert_eq!(store.trucks()[0].plate, "QQQ9999");
    assert_eq!(store.customers().len(), 2);
}

#[test]
fn driver_login_success_and_failure() {
    let (mut store, _storage, notifier) = setup();

    assert!(!store.driver_login("joao", "wrong").unwrap());
    assert!(store.session().is_anonymous());
    let rejected = notifier.last().unwrap();
    assert_eq!(rejected.severity, Severity::Destructive);
    assert_eq!(rejected.title, "Erro de Login Motorista");

    assert!(store.driver_login("joao", "123").unwrap());
    assert_eq!(
        store.authenticated_driver().map(|d| d.name.as_str()),
        Some("João Silva")
    );
    assert_eq!(notifier.last().unwrap().message, "Bem-vindo, João Silva.");
}

#[test]
fn failed_login_keeps_prior_session() {
    let (mut store, _storage, _notifier) = setup();
    store.admin_login("admin", "admin").unwrap();

    assert!(!store.driver_login("maria", "nope").unwrap());
    assert!(store.is_authenticated());
}

#[test]
fn sessions_are_mutually_exclusive() {
    let (mut store, storage, _notifier) = setup();

    assert!(store.driver_login("maria", "123").unwrap());
    assert!(store.admin_login("admin", "admin").unwrap());
    assert!(store.is_authenticated());
    assert!(store.authenticated_driver().is_none());
    assert!(storage.load(StorageKey::AuthenticatedDriver).unwrap().is_none());

    assert!(store.driver_login("joao", "123").unwrap());
    assert!(!store.is_authenticated());
    assert!(storage.load(StorageKey::IsAuthenticated).unwrap().is_none());
    assert_eq!(store.authenticated_driver().unwrap().id, "driver1");
}

#[test]
fn added_delivery_is_visible_immediately() {
    let (mut store, storage, notifier) = setup();
    store.driver_login("joao", "123").unwrap();

    let draft = delivery_form("X", "500", day(10))
        .validate(store.authenticated_driver(), store.customers())
        .unwrap();
    let added = store.add_delivery(draft).unwrap();

    assert_eq!(store.deliveries().len(), 1);
    let stored = &store.deliveries()[0];
    assert_eq!(stored.water_quantity, 500.0);
    assert_eq!(stored.customer_name, "X");
    assert!(!stored.id.is_empty());
    assert_eq!(stored, &added);

    assert!(storage.load(StorageKey::Deliveries).unwrap().is_some());
    assert_eq!(notifier.last().unwrap(), Notification::success("Entrega registrada."));
}

#[test]
fn identifiers_are_unique_across_collections() {
    let (mut store, _storage, _notifier) = setup();
    let driver = store.drivers()[0].clone();
    let mut ids = HashSet::new();

    for i in 0..10 {
        let truck = store
            .add_truck(NewTruck {
                plate: format!("AAA{i:04}"),
            })
            .unwrap();
        let customer = store
            .add_customer(NewCustomer {
                name: format!("Cliente {i}"),
                address: "Rua".to_string(),
            })
            .unwrap();
        let new_driver = store
            .add_driver(NewDriver {
                name: format!("Motorista {i}"),
                username: format!("m{i}"),
                password: "secret".to_string(),
            })
            .unwrap();
        let delivery = store
            .add_delivery(
                delivery_form("Y", "20", day(1))
                    .validate(Some(&driver), &[])
                    .unwrap(),
            )
            .unwrap();
        let fueling = store
            .add_fueling(
                FuelingForm {
                    truck_plate: "ABC-1234".to_string(),
                    station_name: "Posto".to_string(),
                    liters: "50".to_string(),
                    total_value: "300".to_string(),
                    observation: String::new(),
                    date: Some(day(2)),
                }
                .validate(Some(&driver))
                .unwrap(),
            )
            .unwrap();
        let maintenance = store
            .add_maintenance(
                MaintenanceForm {
                    truck_plate: "ABC-1234".to_string(),
                    issue: "Óleo".to_string(),
                    mechanic: "Oficina".to_string(),
                    cost: "0".to_string(),
                    observation: String::new(),
                    date: Some(day(3)),
                }
                .validate(Some(&driver))
                .unwrap(),
            )
            .unwrap();

        for id in [
            truck.id,
            customer.id,
            new_driver.id,
            delivery.id,
            fueling.id,
            maintenance.id,
        ] {
            assert!(ids.insert(id), "identifier reused");
        }
    }

    assert_eq!(ids.len(), 60);
}

#[test]
fn repeated_update_is_idempotent() {
    let (mut store, storage, _notifier) = setup();
    let mut driver = store.drivers()[1].clone();
    driver.name = "Maria O. Santos".to_string();

    assert!(store.update_driver(driver.clone()).unwrap());
    let once = storage.load(StorageKey::Drivers).unwrap();
    let state_once = store.drivers().to_vec();

    assert!(store.update_driver(driver).unwrap());
    assert_eq!(storage.load(StorageKey::Drivers).unwrap(), once);
    assert_eq!(store.drivers(), state_once.as_slice());
}

#[test]
fn delete_of_unknown_id_changes_nothing() {
    let (mut store, storage, notifier) = setup();
    let before = storage.load(StorageKey::Customers).unwrap();
    let notified = notifier.count();

    assert!(!store.delete_customer("ghost").unwrap());
    assert!(!store.delete_delivery("ghost").unwrap());
    assert!(!store.delete_driver("ghost").unwrap());
    assert!(!store.delete_truck("ghost").unwrap());

    assert_eq!(storage.load(StorageKey::Customers).unwrap(), before);
    assert!(storage.load(StorageKey::Deliveries).unwrap().is_none());
    assert_eq!(store.customers().len(), 2);
    assert_eq!(notifier.count(), notified);
}

#[test]
fn deleting_the_logged_in_driver_ends_the_session() {
    let (mut store, storage, _notifier) = setup();
    store.driver_login("maria", "123").unwrap();

    assert!(store.delete_driver("driver2").unwrap());

    assert!(store.session().is_anonymous());
    assert!(storage.load(StorageKey::AuthenticatedDriver).unwrap().is_none());
    assert_eq!(store.drivers().len(), 1);
}

#[test]
fn deleting_another_driver_keeps_the_session() {
    let (mut store, _storage, _notifier) = setup();
    store.driver_login("maria", "123").unwrap();

    assert!(store.delete_driver("driver1").unwrap());
    assert_eq!(store.authenticated_driver().unwrap().id, "driver2");
}

#[test]
fn admin_deleting_a_driver_does_not_cascade() {
    let (mut store, _storage, _notifier) = setup();
    store.admin_login("admin", "admin").unwrap();

    assert!(store.delete_driver("driver1").unwrap());

    assert!(store.is_authenticated());
    assert_eq!(store.drivers().len(), 1);
}

#[test]
fn renaming_a_driver_keeps_historical_snapshots() {
    let (mut store, _storage, _notifier) = setup();
    let driver = store.drivers()[0].clone();
    store
        .add_delivery(
            delivery_form("Z", "100", day(4))
                .validate(Some(&driver), &[])
                .unwrap(),
        )
        .unwrap();

    let renamed = DriverForm {
        name: "João da Silva".to_string(),
        username: driver.username.clone(),
        password: String::new(),
    }
    .apply_to(&driver, store.drivers())
    .unwrap();
    store.update_driver(renamed).unwrap();

    assert_eq!(store.drivers()[0].name, "João da Silva");
    assert_eq!(store.deliveries()[0].driver_name, "João Silva");
}

#[test]
fn state_survives_reopen() {
    let (mut store, storage, _notifier) = setup();
    let driver = store.drivers()[0].clone();
    let delivery = store
        .add_delivery(
            delivery_form("Padaria", "250.5", day(8))
                .validate(Some(&driver), &[])
                .unwrap(),
        )
        .unwrap();
    store.delete_truck("truck2").unwrap();
    store.driver_login("joao", "123").unwrap();

    let reopened = reopen(&storage);

    assert_eq!(reopened.deliveries(), &[delivery]);
    assert_eq!(reopened.trucks().len(), 1);
    assert_eq!(reopened.authenticated_driver().map(|d| d.id.as_str()), Some("driver1"));
}

#[test]
fn restored_driver_session_is_not_revalidated() {
    let storage = Arc::new(MemoryStorage::new());
    let ghost = Driver {
        id: "gone".to_string(),
        name: "Ex Motorista".to_string(),
        username: "ex".to_string(),
        password: "x".to_string(),
    };
    storage
        .save(
            StorageKey::AuthenticatedDriver,
            &serde_json::to_string(&ghost).unwrap(),
        )
        .unwrap();

    let store = reopen(&storage);

    assert_eq!(store.session(), &Session::Driver(ghost));
}

#[test]
fn admin_flag_is_restored() {
    let storage = Arc::new(MemoryStorage::new());
    storage.save(StorageKey::IsAuthenticated, "true").unwrap();

    assert!(reopen(&storage).is_authenticated());

    storage.save(StorageKey::IsAuthenticated, "false").unwrap();
    assert!(!reopen(&storage).is_authenticated());
}

#[test]
fn corrupt_blob_fails_to_open() {
    let storage = Arc::new(MemoryStorage::new());
    storage.save(StorageKey::Deliveries, "{not json").unwrap();

    let result = Store::open(
        storage,
        Arc::new(RecordingNotifier::default()),
        Metrics::new(),
    );

    assert!(matches!(result, Err(AppError::Serialization(_))));
}

#[test]
fn file_storage_round_trip_through_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let mut store = Store::open(
            storage,
            Arc::new(RecordingNotifier::default()),
            Metrics::new(),
        )
        .unwrap();
        store.admin_login("admin", "admin").unwrap();
        store
            .add_customer(NewCustomer {
                name: "Hotel Beira Mar".to_string(),
                address: "Av. Atlântica, 1".to_string(),
            })
            .unwrap();
    }

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let store = Store::open(
        storage,
        Arc::new(RecordingNotifier::default()),
        Metrics::new(),
    )
    .unwrap();

    assert!(store.is_authenticated());
    assert_eq!(store.customers().len(), 3);
    assert_eq!(store.customers()[2].name, "Hotel Beira Mar");
}

#[test]
fn dashboard_filter_and_export_over_store_state() {
    let (mut store, _storage, _notifier) = setup();
    let driver = store.drivers()[1].clone();
    for (customer, date) in [("Alfa", day(3)), ("Beta", day(9)), ("Gama", day(6))] {
        store
            .add_delivery(
                delivery_form(customer, "100", date)
                    .validate(Some(&driver), &[])
                    .unwrap(),
            )
            .unwrap();
    }

    let outside = DeliveryFilter {
        range: DateRange::new(Some(day(20)), Some(day(25))),
        ..Default::default()
    };
    assert!(outside.apply(store.deliveries()).is_empty());

    let recent = DeliveryFilter {
        range: DateRange::new(Some(day(5)), None),
        driver: "maria".to_string(),
        ..Default::default()
    }
    .apply(store.deliveries());
    let names: Vec<&str> = recent.iter().map(|d| d.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Gama"]);

    let generated_at = day(15).and_hms_opt(18, 30, 0).unwrap();
    let report = Report::build(ReportKind::Deliveries, &recent, generated_at, 40).unwrap();
    assert_eq!(report.file_name, "entregas_2024-06-15_18-30.txt");
    assert_eq!(report.pages[0][0][0], "Beta");
    assert_eq!(report.pages[0][0][5], "100");
    assert_eq!(report.pages[0][0][6], "Maria Oliveira");
}
