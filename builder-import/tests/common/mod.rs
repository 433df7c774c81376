//! Shared fixtures: a slice of a financial domain model large enough to
//! exercise envelopes, nested types, enums and multi-cardinality.

#![allow(dead_code)]

use builder_import::NodeBuilder;
use builder_model::{
    BasicKind, Cardinality, EnumType, ModelAttribute, StructuredType, TypeDefinition,
};
use builder_registry::{CachedRegistry, InMemorySource};
use builder_types::FixedGenerator;

pub const PARTY_NS: &str = "cdm.base.staticdata.party";
pub const COLLATERAL_NS: &str = "cdm.product.collateral";
pub const IDENTIFIER_NS: &str = "cdm.base.staticdata.identifier";
pub const SETTLEMENT_NS: &str = "cdm.product.common.settlement";

pub fn party() -> StructuredType {
    StructuredType::new(PARTY_NS, "Party").with_description("Party Description")
}

pub fn party_identifier() -> StructuredType {
    StructuredType::new(PARTY_NS, "PartyIdentifier")
}

pub fn natural_person() -> StructuredType {
    StructuredType::new(PARTY_NS, "NaturalPerson")
}

pub fn person_identifier() -> StructuredType {
    StructuredType::new(PARTY_NS, "PersonIdentifier")
}

pub fn identifier() -> StructuredType {
    StructuredType::new(IDENTIFIER_NS, "Identifier")
}

pub fn eligible_collateral_specification() -> StructuredType {
    StructuredType::new(COLLATERAL_NS, "EligibleCollateralSpecification")
}

pub fn eligible_collateral_criteria() -> StructuredType {
    StructuredType::new(COLLATERAL_NS, "EligibleCollateralCriteria")
        .with_description("Represents a set of criteria used to specify eligible collateral.")
}

pub fn issuer_criteria() -> StructuredType {
    StructuredType::new(COLLATERAL_NS, "IssuerCriteria")
}

pub fn asset_criteria() -> StructuredType {
    StructuredType::new(COLLATERAL_NS, "AssetCriteria")
}

pub fn cashflow() -> StructuredType {
    StructuredType::new(SETTLEMENT_NS, "Cashflow")
}

pub fn money() -> StructuredType {
    StructuredType::new("cdm.observable.asset", "Money")
}

fn string(name: &str, cardinality: Cardinality) -> ModelAttribute {
    ModelAttribute::basic(name, BasicKind::String, cardinality)
}

fn country_code_enum() -> EnumType {
    EnumType::new("cdm.base.staticdata.codelist", "ISOCountryCodeEnum", &["FR", "GB", "UK", "US", "USA"])
}

fn party_identifier_type_enum() -> EnumType {
    EnumType::new(PARTY_NS, "PartyIdentifierTypeEnum", &["BIC", "LEI", "MIC"])
}

pub fn definitions() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition::new(
            party(),
            vec![
                string("name", Cardinality::optional()).with_metadata(),
                ModelAttribute::structured("partyId", party_identifier(), Cardinality::many()),
                ModelAttribute::structured("person", natural_person(), Cardinality::many()),
                string("meta", Cardinality::optional()),
            ],
        ),
        TypeDefinition::new(
            party_identifier(),
            vec![
                string("identifier", Cardinality::one()).with_metadata(),
                ModelAttribute::enumeration("identifierType", party_identifier_type_enum(), Cardinality::optional()),
            ],
        ),
        TypeDefinition::new(
            natural_person(),
            vec![
                string("firstName", Cardinality::optional()),
                string("surname", Cardinality::optional()),
                ModelAttribute::basic("dateOfBirth", BasicKind::Date, Cardinality::optional()),
                ModelAttribute::structured("personId", person_identifier(), Cardinality::many()).with_metadata(),
            ],
        ),
        TypeDefinition::new(
            person_identifier(),
            vec![
                string("identifier", Cardinality::one()).with_metadata(),
                string("identifierType", Cardinality::optional()),
            ],
        ),
        TypeDefinition::new(
            identifier(),
            vec![
                ModelAttribute::structured("issuerReference", party(), Cardinality::optional()).with_metadata(),
                string("issuer", Cardinality::optional()).with_metadata(),
            ],
        ),
        TypeDefinition::new(
            eligible_collateral_specification(),
            vec![
                ModelAttribute::structured("identifier", identifier(), Cardinality::many()),
                ModelAttribute::structured("criteria", eligible_collateral_criteria(), Cardinality::new(1, None)),
            ],
        ),
        TypeDefinition::new(
            eligible_collateral_criteria(),
            vec![
                ModelAttribute::structured("issuer", issuer_criteria(), Cardinality::many()),
                ModelAttribute::structured("asset", asset_criteria(), Cardinality::many()),
            ],
        ),
        TypeDefinition::new(
            issuer_criteria(),
            vec![
                ModelAttribute::enumeration("issuerCountryOfOrigin", country_code_enum(), Cardinality::many()).with_metadata(),
            ],
        ),
        TypeDefinition::new(
            asset_criteria(),
            vec![
                ModelAttribute::enumeration("assetCountryOfOrigin", country_code_enum(), Cardinality::many()).with_metadata(),
                ModelAttribute::basic("maturityYears", BasicKind::Int, Cardinality::optional()),
            ],
        ),
        TypeDefinition::new(
            cashflow(),
            vec![
                ModelAttribute::structured("amount", money(), Cardinality::one()),
                ModelAttribute::basic("settlementDate", BasicKind::Date, Cardinality::optional()),
                ModelAttribute::basic("cleared", BasicKind::Boolean, Cardinality::optional()),
            ],
        ),
        TypeDefinition::new(
            money(),
            vec![
                ModelAttribute::basic("value", BasicKind::Number, Cardinality::one()),
                string("currency", Cardinality::one()).with_metadata(),
            ],
        ),
    ]
}

pub fn source() -> InMemorySource {
    definitions()
        .into_iter()
        .fold(InMemorySource::new(), InMemorySource::with_type)
}

pub type TestBuilder = NodeBuilder<CachedRegistry<InMemorySource>, FixedGenerator>;

/// Builder whose ids are all `12345`, so trees compare with `==`.
pub fn builder() -> TestBuilder {
    NodeBuilder::new(CachedRegistry::new(source()), FixedGenerator::default())
}

/// Looks up an attribute as the schema declares it.
pub fn attribute(ty: &StructuredType, name: &str) -> ModelAttribute {
    let source = source();
    let def = source
        .get(&ty.key())
        .unwrap_or_else(|| panic!("no type {}", ty.key()));
    def.attribute(name)
        .unwrap_or_else(|| panic!("no attribute {name} on {}", ty.key()))
        .clone()
}
