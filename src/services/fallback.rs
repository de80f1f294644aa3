// src/services/fallback.rs

// Dados de demonstração usados quando o app roda sem banco (modo offline).
// São linhas cruas: passam pelos mesmos adaptadores que as do banco.

use crate::models::{
    company::RawCompany,
    kanban::{RawKanbanItem, Stage},
    partner::RawPartner,
};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub fn companies() -> Vec<RawCompany> {
    vec![
        RawCompany {
            id: 1,
            name: "Supermercado Bom Preço".into(),
            company_type: text("Supermercado"),
            stores: Some(12),
            stores_by_state_json: text(r#"{"PE": 8, "PB": 3, "AL": 1}"#),
            total_value: Some(48_500.0),
            status: text("ativo"),
            contact_name: text("Mariana Lopes"),
            contact_phone: text("(81) 99876-1234"),
            contact_email: text("compras@bompreco.com.br"),
        },
        RawCompany {
            id: 2,
            name: "Rede Farmácia Vida".into(),
            company_type: text("Farmácia"),
            stores: Some(5),
            stores_by_state_json: text(r#"{"PE": 5}"#),
            total_value: Some(12_300.0),
            status: text("ativo"),
            contact_name: text("Carlos Menezes"),
            contact_phone: text("(81) 3333-4455"),
            contact_email: text("carlos@farmaciavida.com.br"),
        },
        RawCompany {
            id: 3,
            name: "Academia Corpo em Forma".into(),
            company_type: text("Academia"),
            stores: Some(2),
            stores_by_state_json: None,
            total_value: Some(3_200.0),
            status: text("inativo"),
            contact_name: text("Juliana Freitas"),
            contact_phone: text("(83) 98888-7766"),
            contact_email: text("contato@corpoemforma.com"),
        },
    ]
}

pub fn partners() -> Vec<RawPartner> {
    vec![
        RawPartner {
            id: 1,
            name: "Distribuidora Águas do Norte".into(),
            region: text("Região Metropolitana"),
            cities_json: text(r#"["Recife", "Olinda", "Paulista"]"#),
            contact_name: text("Roberto Alves"),
            contact_phone: text("(81) 99111-2233"),
            contact_email: text("roberto@aguasdonorte.com.br"),
            status: text("ativo"),
            receipts_status: text("enviado"),
        },
        RawPartner {
            id: 2,
            name: "Agreste Distribuição".into(),
            region: text("Agreste"),
            cities_json: text(r#"["Caruaru", "Garanhuns"]"#),
            contact_name: text("Fernanda Costa"),
            contact_phone: text("(81) 98222-3344"),
            contact_email: text("fernanda@agreste.com.br"),
            status: text("ativo"),
            receipts_status: text("pendente"),
        },
    ]
}

pub fn kanban() -> Vec<RawKanbanItem> {
    let item = |company: &str, stage: Stage, receipts: i64, total: i64| RawKanbanItem {
        company: company.to_string(),
        stage,
        receipts,
        total,
    };

    vec![
        item("Supermercado Bom Preço", Stage::Recebimento, 8, 12),
        item("Rede Farmácia Vida", Stage::Relatorio, 5, 5),
        item("Academia Corpo em Forma", Stage::NotaFiscal, 2, 2),
    ]
}
