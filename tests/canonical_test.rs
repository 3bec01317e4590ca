#[cfg(test)]
mod canonical_resolution {
    use nyumba::{
        canonical::{
            canonical_path, full_canonical_url, resolve_in, should_use_canonical, CanonicalMapping,
        },
        models::property_type::{PropertyCategory, TransactionType},
    };

    #[test]
    fn bedroom_specific_row_beats_generic_row() {
        let path = canonical_path("nairobi-county", "apartment", TransactionType::Rent, Some(2));
        assert_eq!(path, Some("/2-bedroom-apartment-nairobi"));
    }

    #[test]
    fn generic_row_wins_without_bedrooms() {
        assert_eq!(
            canonical_path("nairobi-county", "Apartment", TransactionType::Rent, None),
            Some("/apartments-for-rent-nairobi")
        );
        assert_eq!(
            canonical_path("nairobi-county", "apartment", TransactionType::Rent, Some(3)),
            Some("/apartments-for-rent-nairobi")
        );
    }

    #[test]
    fn unmatched_combinations_resolve_to_none() {
        assert_eq!(
            canonical_path("nairobi-county", "apartment", TransactionType::Sale, None),
            None
        );
        assert_eq!(canonical_path("mombasa-county", "house", TransactionType::Rent, None), None);
        assert_eq!(canonical_path("westlands", "house", TransactionType::Rent, None), None);
        assert_eq!(canonical_path("kasarani", "Warehouse", TransactionType::Rent, None), None);
        assert!(!should_use_canonical("kilimani", "land", TransactionType::Rent, None));
    }

    #[test]
    fn property_type_variants_share_a_bucket() {
        for raw in ["2 Bedroom Apartment", "Flat", "apartment"] {
            assert_eq!(
                PropertyCategory::from_listing_type(raw),
                Some(PropertyCategory::Apartment),
                "{raw}"
            );
            assert_eq!(
                canonical_path("westlands", raw, TransactionType::Rent, None),
                Some("/apartments-westlands")
            );
        }
        assert_eq!(
            canonical_path("kasarani", "Studio", TransactionType::Rent, None),
            Some("/bedsitter-kasarani")
        );
        assert_eq!(
            canonical_path("nairobi-county", "Maisonette", TransactionType::Rent, None),
            Some("/houses-for-rent-nairobi")
        );
    }

    #[test]
    fn unset_columns_act_as_wildcards() {
        let table = [
            CanonicalMapping {
                slug: "karen",
                category: None,
                transaction: None,
                bedrooms: None,
                path: "/karen",
                priority: 1,
            },
            CanonicalMapping {
                slug: "karen",
                category: Some(PropertyCategory::House),
                transaction: Some(TransactionType::Sale),
                bedrooms: None,
                path: "/houses-for-sale-karen",
                priority: 2,
            },
        ];

        let resolve = |property_type: &str, transaction| {
            resolve_in(&table, "karen", property_type, transaction, None).map(|row| row.path)
        };

        assert_eq!(resolve("Villa", TransactionType::Sale), Some("/houses-for-sale-karen"));
        assert_eq!(resolve("Villa", TransactionType::Rent), Some("/karen"));
        assert_eq!(resolve("Office", TransactionType::Sale), Some("/karen"));
    }

    #[test]
    fn equal_priority_keeps_the_earlier_row() {
        let row = |path| CanonicalMapping {
            slug: "ruaka",
            category: None,
            transaction: None,
            bedrooms: None,
            path,
            priority: 1,
        };
        let table = [row("/first"), row("/second")];

        let resolved = resolve_in(&table, "ruaka", "house", TransactionType::Rent, None);
        assert_eq!(resolved.map(|r| r.path), Some("/first"));
    }

    #[test]
    fn full_url_joins_site_origin() {
        assert_eq!(
            full_canonical_url(
                "https://newkenyan.com/",
                "kilimani",
                "apartment",
                TransactionType::Rent,
                None
            ),
            Some("https://newkenyan.com/apartments-kilimani".to_string())
        );
        assert_eq!(
            full_canonical_url("https://newkenyan.com", "kilimani", "house", TransactionType::Rent, None),
            None
        );
    }
}
