//! Default fleet written on first start.

use crate::models::customer::Customer;
use crate::models::driver::Driver;
use crate::models::truck::Truck;

pub fn default_drivers() -> Vec<Driver> {
    vec![
        Driver {
            id: "driver1".to_string(),
            name: "João Silva".to_string(),
            username: "joao".to_string(),
            password: "123".to_string(),
        },
        Driver {
            id: "driver2".to_string(),
            name: "Maria Oliveira".to_string(),
            username: "maria".to_string(),
            password: "123".to_string(),
        },
    ]
}

pub fn default_trucks() -> Vec<Truck> {
    vec![
        Truck {
            id: "truck1".to_string(),
            plate: "ABC-1234".to_string(),
        },
        Truck {
            id: "truck2".to_string(),
            plate: "XYZ-5678".to_string(),
        },
    ]
}

pub fn default_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "customer1".to_string(),
            name: "Padaria Pão Quente".to_string(),
            address: "Rua das Flores, 10, Centro".to_string(),
        },
        Customer {
            id: "customer2".to_string(),
            name: "Restaurante Sabor Divino".to_string(),
            address: "Av. Principal, 250, Bairro Bom".to_string(),
        },
    ]
}
