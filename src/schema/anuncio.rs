//! Built-in schema for campaign-ad ("Anuncio") rows

use std::sync::OnceLock;

use rust_decimal::Decimal;

use super::types::{Bound, FieldKind, FieldSpec, NormalizationRule, Schema};

/// Field names, exactly as they appear in source headers
pub mod fields {
    pub const ORGANIZADOR: &str = "Organizador";
    pub const ANO_MES: &str = "Ano_Mes";
    pub const DIA_DA_SEMANA: &str = "Dia_da_Semana";
    pub const TIPO_DIA: &str = "Tipo_Dia";
    pub const OBJETIVO: &str = "Objetivo";
    pub const DATE: &str = "Date";
    pub const ADSET_NAME: &str = "AdSet_name";
    pub const AMOUNT_SPENT: &str = "Amount_spent";
    pub const LINK_CLICKS: &str = "Link_clicks";
    pub const IMPRESSIONS: &str = "Impressions";
    pub const CONVERSIONS: &str = "Conversions";
    pub const SEGMENTACAO: &str = "Segmentação";
    pub const TIPO_DE_ANUNCIO: &str = "Tipo_de_Anúncio";
    pub const FASE: &str = "Fase";
}

pub const TIPO_DIA_VALUES: [&str; 2] = ["Dia útil", "Final de Semana"];
pub const TIPO_DE_ANUNCIO_VALUES: [&str; 2] = ["Estático", "Video"];

/// Smallest representable spend; zero spend is rewritten to this.
pub fn amount_spent_minimum() -> Decimal {
    Decimal::new(1, 2)
}

static ANUNCIO: OnceLock<Schema> = OnceLock::new();

impl Schema {
    /// The campaign-ad schema, built once per process.
    pub fn anuncio() -> &'static Schema {
        ANUNCIO.get_or_init(build)
    }
}

fn build() -> Schema {
    use fields::*;

    let non_negative = Bound::AtLeast(Decimal::ZERO);

    let fields = vec![
        FieldSpec::required(ORGANIZADOR, FieldKind::Integer)
            .with_bound(non_negative)
            .described("Campaign organizer identifier"),
        FieldSpec::required(ANO_MES, FieldKind::String)
            .described("Campaign year and month, e.g. '2024 | Março'"),
        FieldSpec::required(DIA_DA_SEMANA, FieldKind::String)
            .described("Weekday the campaign ran, e.g. 'Sexta-Feira'"),
        FieldSpec::required_enum(TIPO_DIA, &TIPO_DIA_VALUES)
            .described("Business day or weekend"),
        FieldSpec::required(OBJETIVO, FieldKind::String)
            .described("Campaign objective, e.g. 'Leads'"),
        FieldSpec::required(DATE, FieldKind::Date).described("Campaign date, YYYY-MM-DD"),
        FieldSpec::required(ADSET_NAME, FieldKind::String).described("Ad set name"),
        FieldSpec::required(AMOUNT_SPENT, FieldKind::Decimal)
            .with_bound(Bound::GreaterThan(Decimal::ZERO))
            .described("Amount spent, two decimal places"),
        FieldSpec::optional(LINK_CLICKS, FieldKind::Integer)
            .with_bound(non_negative)
            .described("Link clicks, when reported"),
        FieldSpec::required(IMPRESSIONS, FieldKind::Integer)
            .with_bound(non_negative)
            .described("Ad impressions"),
        FieldSpec::optional(CONVERSIONS, FieldKind::Integer)
            .described("Conversions, when reported"),
        FieldSpec::required(SEGMENTACAO, FieldKind::String)
            .described("Audience segment, e.g. 'LookALike_Compradores_1'"),
        FieldSpec::required_enum(TIPO_DE_ANUNCIO, &TIPO_DE_ANUNCIO_VALUES)
            .described("Creative type"),
        FieldSpec::required(FASE, FieldKind::String)
            .described("Launch phase, e.g. '2º Lançamento | Leads'"),
    ];

    let mut schema = Schema::new("anuncio", "1", fields).with_normalization(vec![
        NormalizationRule::MissingToAbsent {
            field: LINK_CLICKS.into(),
        },
        NormalizationRule::MissingToAbsent {
            field: CONVERSIONS.into(),
        },
        NormalizationRule::ZeroToMinimum {
            field: AMOUNT_SPENT.into(),
            minimum: amount_spent_minimum(),
        },
    ]);
    schema.description = Some("Campaign-ad performance row".into());
    schema
}
