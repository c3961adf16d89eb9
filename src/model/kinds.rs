//! Field-kind lookup table.
//!
//! Maps the framework's field kinds to the closed set of storage types.
//! Supporting a new kind is one entry in `FIELD_KINDS`; a kind missing from
//! the table is rejected by the collector instead of falling back to a default.

use super::Cardinality;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

/// Storage types used for display in every output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    Integer,
    BigInt,
    SmallInt,
    Double,
    Decimal,
    Boolean,
    Varchar,
    Text,
    Date,
    DateTime,
    Time,
    Interval,
    Uuid,
    Binary,
    Json,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Geometry,
    Raster,
}

impl StorageType {
    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            StorageType::Integer => "integer",
            StorageType::BigInt => "bigint",
            StorageType::SmallInt => "smallint",
            StorageType::Double => "double",
            StorageType::Decimal => "decimal",
            StorageType::Boolean => "boolean",
            StorageType::Varchar => "varchar",
            StorageType::Text => "text",
            StorageType::Date => "date",
            StorageType::DateTime => "datetime",
            StorageType::Time => "time",
            StorageType::Interval => "interval",
            StorageType::Uuid => "uuid",
            StorageType::Binary => "binary",
            StorageType::Json => "json",
            StorageType::Point => "point",
            StorageType::LineString => "linestring",
            StorageType::Polygon => "polygon",
            StorageType::MultiPoint => "multipoint",
            StorageType::MultiLineString => "multilinestring",
            StorageType::MultiPolygon => "multipolygon",
            StorageType::GeometryCollection => "geometrycollection",
            StorageType::Geometry => "geometry",
            StorageType::Raster => "raster",
        }
    }

    /// Spatial shape types (`geometry` and `raster` excluded)
    pub fn is_spatial_shape(self) -> bool {
        matches!(
            self,
            StorageType::Point
                | StorageType::LineString
                | StorageType::Polygon
                | StorageType::MultiPoint
                | StorageType::MultiLineString
                | StorageType::MultiPolygon
                | StorageType::GeometryCollection
        )
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field kind is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindClass {
    /// Plain column with a fixed storage type
    Scalar(StorageType),
    /// Reference to another model; storage follows the target's primary key
    Relation(Cardinality),
}

use Cardinality::*;
use KindClass::{Relation, Scalar};
use StorageType::*;

const FIELD_KINDS: &[(&str, KindClass)] = &[
    ("AutoField", Scalar(Integer)),
    ("BigAutoField", Scalar(BigInt)),
    ("SmallAutoField", Scalar(SmallInt)),
    ("IntegerField", Scalar(Integer)),
    ("BigIntegerField", Scalar(BigInt)),
    ("SmallIntegerField", Scalar(SmallInt)),
    ("PositiveIntegerField", Scalar(Integer)),
    ("PositiveBigIntegerField", Scalar(BigInt)),
    ("PositiveSmallIntegerField", Scalar(SmallInt)),
    ("FloatField", Scalar(Double)),
    ("DecimalField", Scalar(Decimal)),
    ("BooleanField", Scalar(Boolean)),
    ("NullBooleanField", Scalar(Boolean)),
    ("CharField", Scalar(Varchar)),
    ("SlugField", Scalar(Varchar)),
    ("EmailField", Scalar(Varchar)),
    ("URLField", Scalar(Varchar)),
    ("FileField", Scalar(Varchar)),
    ("ImageField", Scalar(Varchar)),
    ("FilePathField", Scalar(Varchar)),
    ("GenericIPAddressField", Scalar(Varchar)),
    ("IPAddressField", Scalar(Varchar)),
    ("TextField", Scalar(Text)),
    ("DateField", Scalar(Date)),
    ("DateTimeField", Scalar(DateTime)),
    ("TimeField", Scalar(Time)),
    ("DurationField", Scalar(Interval)),
    ("UUIDField", Scalar(Uuid)),
    ("BinaryField", Scalar(Binary)),
    ("JSONField", Scalar(Json)),
    ("PointField", Scalar(Point)),
    ("LineStringField", Scalar(LineString)),
    ("PolygonField", Scalar(Polygon)),
    ("MultiPointField", Scalar(MultiPoint)),
    ("MultiLineStringField", Scalar(MultiLineString)),
    ("MultiPolygonField", Scalar(MultiPolygon)),
    ("GeometryCollectionField", Scalar(GeometryCollection)),
    ("GeometryField", Scalar(Geometry)),
    ("RasterField", Scalar(Raster)),
    ("ForeignKey", Relation(ManyToOne)),
    ("OneToOneField", Relation(OneToOne)),
    ("ManyToManyField", Relation(ManyToMany)),
];

static KIND_TABLE: Lazy<AHashMap<&'static str, KindClass>> =
    Lazy::new(|| FIELD_KINDS.iter().copied().collect());

/// Look up a field kind; `None` means the kind is unsupported
pub fn lookup_kind(kind: &str) -> Option<KindClass> {
    KIND_TABLE.get(kind).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lookup() {
        assert_eq!(lookup_kind("CharField"), Some(Scalar(Varchar)));
        assert_eq!(lookup_kind("BigAutoField"), Some(Scalar(BigInt)));
        assert_eq!(lookup_kind("PointField"), Some(Scalar(Point)));
    }

    #[test]
    fn test_relation_lookup() {
        assert_eq!(lookup_kind("ForeignKey"), Some(Relation(ManyToOne)));
        assert_eq!(lookup_kind("ManyToManyField"), Some(Relation(ManyToMany)));
        assert_eq!(lookup_kind("OneToOneField"), Some(Relation(OneToOne)));
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(lookup_kind("MoneyField"), None);
        // Kinds are case-sensitive class names
        assert_eq!(lookup_kind("charfield"), None);
    }

    #[test]
    fn test_table_has_no_duplicates() {
        assert_eq!(KIND_TABLE.len(), FIELD_KINDS.len());
    }
}
