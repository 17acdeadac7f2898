//! # Seed Data
//!
//! Fixed sample data used when a collection has never been persisted or its
//! stored value cannot be parsed. Mirrors the shop's demo dataset: DTF inks,
//! adhesive powder, PET film, two tube models, and a pair of sample orders.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use grafica_core::{
    BomLine, Customer, CustomerStatus, OrderStatus, PaymentKey, PaymentKeyKind, PaymentMethod,
    PaymentStatus, PrintOrder, Product, Seller, Supply, SupplyKind, SupplyPurchase, TubeModel,
};

// Seed literals are static and always valid; expect() here can never fire.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static seed date")
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("static seed timestamp")
}

pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: "1".to_string(),
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
            company: "Design Master".to_string(),
            cnpj_cpf: "123.456.789-00".to_string(),
            state_registration: "Isento".to_string(),
            delivery_address: "Rua das Flores, 123, São Paulo, SP".to_string(),
            status: CustomerStatus::Active,
            last_contact: date(2023, 6, 15),
        },
        Customer {
            id: "2".to_string(),
            name: "Maria Souza".to_string(),
            email: "maria@confeccoes.com".to_string(),
            phone: "(21) 99876-5432".to_string(),
            company: "Confecções Souza".to_string(),
            cnpj_cpf: "12.345.678/0001-90".to_string(),
            state_registration: "123456789".to_string(),
            delivery_address: "Av. Paulista, 1500, São Paulo, SP".to_string(),
            status: CustomerStatus::Active,
            last_contact: date(2023, 7, 22),
        },
    ]
}

pub fn supplies() -> Vec<Supply> {
    fn supply(
        id: &str,
        name: &str,
        description: &str,
        kind: SupplyKind,
        quantity: f64,
        unit: &str,
        reorder_point: f64,
        consumption_per_meter: f64,
    ) -> Supply {
        Supply {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
            quantity,
            unit: unit.to_string(),
            reorder_point,
            consumption_per_meter: Some(consumption_per_meter),
        }
    }

    vec![
        supply(
            "1",
            "Tinta Preta DTF",
            "Tinta preta para impressão DTF de alta qualidade",
            SupplyKind::Tinta,
            2.5,
            "L",
            0.5,
            0.01,
        ),
        supply(
            "2",
            "Tinta Ciano DTF",
            "Tinta ciano para impressão DTF",
            SupplyKind::Tinta,
            2.0,
            "L",
            0.5,
            0.008,
        ),
        supply(
            "3",
            "Tinta Magenta DTF",
            "Tinta magenta para impressão DTF",
            SupplyKind::Tinta,
            2.0,
            "L",
            0.5,
            0.008,
        ),
        supply(
            "4",
            "Tinta Amarela DTF",
            "Tinta amarela para impressão DTF",
            SupplyKind::Tinta,
            2.0,
            "L",
            0.5,
            0.007,
        ),
        supply(
            "5",
            "Tinta Branca DTF",
            "Tinta branca para impressão DTF",
            SupplyKind::Tinta,
            3.0,
            "L",
            1.0,
            0.02,
        ),
        supply(
            "6",
            "Cola em Pó DTF",
            "Cola em pó para fixação da impressão DTF",
            SupplyKind::Cola,
            5.0,
            "kg",
            1.0,
            0.01,
        ),
        supply(
            "7",
            "Filme PET DTF",
            "Filme base para impressão DTF",
            SupplyKind::Filme,
            100.0,
            "m",
            20.0,
            1.0,
        ),
    ]
}

pub fn supply_purchases() -> Vec<SupplyPurchase> {
    vec![
        SupplyPurchase {
            id: "1".to_string(),
            supply_id: "1".to_string(),
            quantity: 5.0,
            purchase_date: date(2023, 9, 15),
            supplier: "Insumos DTF Ltda".to_string(),
            price_cents: 25_000,
            notes: Some("Compra inicial de tinta preta".to_string()),
        },
        SupplyPurchase {
            id: "2".to_string(),
            supply_id: "7".to_string(),
            quantity: 200.0,
            purchase_date: date(2023, 9, 20),
            supplier: "Materiais Gráficos SA".to_string(),
            price_cents: 120_000,
            notes: Some("Filme PET com entrega expressa".to_string()),
        },
    ]
}

pub fn tube_models() -> Vec<TubeModel> {
    vec![
        TubeModel {
            id: "1".to_string(),
            name: "Tubete Padrão".to_string(),
            size: "8cm x 50cm".to_string(),
            quantity: 100,
            reorder_point: 20,
        },
        TubeModel {
            id: "2".to_string(),
            name: "Tubete Grande".to_string(),
            size: "10cm x 100cm".to_string(),
            quantity: 50,
            reorder_point: 10,
        },
    ]
}

pub fn products() -> Vec<Product> {
    fn bom(lines: &[(&str, f64)]) -> Vec<BomLine> {
        lines
            .iter()
            .map(|(supply_id, rate)| BomLine {
                supply_id: supply_id.to_string(),
                consumption_per_meter: *rate,
            })
            .collect()
    }

    vec![
        Product {
            id: "1".to_string(),
            name: "DTF Padrão".to_string(),
            description: "Impressão DTF Padrão em PET".to_string(),
            unit: "m".to_string(),
            price_cents: 4000,
            supplies: bom(&[("1", 0.01), ("5", 0.02), ("6", 0.01), ("7", 1.0)]),
        },
        Product {
            id: "2".to_string(),
            name: "DTF Premium".to_string(),
            description: "Impressão DTF Premium com maior durabilidade".to_string(),
            unit: "m".to_string(),
            price_cents: 6000,
            supplies: bom(&[
                ("1", 0.012),
                ("2", 0.01),
                ("3", 0.01),
                ("4", 0.01),
                ("5", 0.025),
                ("6", 0.015),
                ("7", 1.0),
            ]),
        },
        Product {
            id: "3".to_string(),
            name: "DTF Sublimação".to_string(),
            description: "Impressão DTF com efeito de sublimação".to_string(),
            unit: "m".to_string(),
            price_cents: 5500,
            supplies: bom(&[
                ("2", 0.015),
                ("3", 0.015),
                ("4", 0.015),
                ("5", 0.02),
                ("6", 0.01),
                ("7", 1.0),
            ]),
        },
    ]
}

pub fn sellers() -> Vec<Seller> {
    vec![
        Seller {
            id: "1".to_string(),
            name: "Carlos Vendas".to_string(),
            email: "carlos@grafica.com".to_string(),
        },
        Seller {
            id: "2".to_string(),
            name: "Ana Marketing".to_string(),
            email: "ana@grafica.com".to_string(),
        },
    ]
}

pub fn payment_keys() -> Vec<PaymentKey> {
    vec![
        PaymentKey {
            id: "1".to_string(),
            kind: PaymentKeyKind::Cpf,
            key: "123.456.789-00".to_string(),
            description: "CPF do Proprietário".to_string(),
        },
        PaymentKey {
            id: "2".to_string(),
            kind: PaymentKeyKind::Cnpj,
            key: "12.345.678/0001-90".to_string(),
            description: "CNPJ da Empresa".to_string(),
        },
        PaymentKey {
            id: "3".to_string(),
            kind: PaymentKeyKind::Email,
            key: "financeiro@grafica.com".to_string(),
            description: "Email Financeiro".to_string(),
        },
    ]
}

pub fn print_orders() -> Vec<PrintOrder> {
    vec![
        PrintOrder {
            id: "1".to_string(),
            order_number: "P001".to_string(),
            customer_id: "1".to_string(),
            product_id: "1".to_string(),
            quantity: 10.0,
            price_cents: 4000,
            total_cents: 40_000,
            seller_id: "1".to_string(),
            status: OrderStatus::Analise,
            payment_method: PaymentMethod::Pix,
            payment_key_id: Some("1".to_string()),
            payment_status: PaymentStatus::Pago,
            tube_model_id: None,
            tube_quantity: 0,
            delivery_date: date(2023, 10, 10),
            created_at: date(2023, 10, 1),
            created_time: "10:00".to_string(),
            updated_at: timestamp(2023, 10, 1, 14, 30),
            notes: "Impressão de logo para camisetas".to_string(),
        },
        PrintOrder {
            id: "2".to_string(),
            order_number: "P002".to_string(),
            customer_id: "2".to_string(),
            product_id: "2".to_string(),
            quantity: 5.0,
            price_cents: 6000,
            total_cents: 30_000,
            seller_id: "2".to_string(),
            status: OrderStatus::Analise,
            payment_method: PaymentMethod::Credito,
            payment_key_id: None,
            payment_status: PaymentStatus::Pendente,
            tube_model_id: None,
            tube_quantity: 0,
            delivery_date: date(2023, 10, 15),
            created_at: date(2023, 10, 5),
            created_time: "09:15".to_string(),
            updated_at: timestamp(2023, 10, 5, 9, 15),
            notes: "Cliente solicitou amostra física antes".to_string(),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
