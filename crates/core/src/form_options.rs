//! Fixed option lists for the public ticket form.

use serde::Serialize;

pub const CATEGORY_OFFICE: &str = "Office Issue";
pub const CATEGORY_VEHICLE: &str = "Vehicle Issue";

/// Sub-category that requires a free-text description.
pub const SUB_CATEGORY_OTHERS: &str = "Others";

pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        CATEGORY_OFFICE,
        &[
            "Water/Plumbing",
            "Dispenser",
            "Electrical (AC, lighting etc.)",
            "Furniture",
            "Cleaning",
            SUB_CATEGORY_OTHERS,
        ],
    ),
    (
        CATEGORY_VEHICLE,
        &[
            "Periodic Maintenance",
            "Battery",
            "Electrical/Mechanical Issue",
            "Accidents",
            "Tyre",
            "Vehicle Registration",
            SUB_CATEGORY_OTHERS,
        ],
    ),
];

pub const DEPARTMENTS: &[&str] = &[
    "HR",
    "Audit",
    "Supply Chain / Store",
    "Admin / Health / Security / Legal",
    "Production",
    "Accounts / Finance",
    "Electrical / Maintenance",
    "IT",
];

pub const STAFF_LOCATIONS: &[&str] = &[
    "KAM HQ",
    "KSICL – Jimba",
    "KSICL – Sagamu / Hullmac",
    "KAM Haulage",
    "Dimkit Ganmo",
    "Dimkit Kaduna",
    "Lagos Office",
];

pub const ACCOMMODATION_LOCATIONS: &[&str] = &[
    "GCFO Quarters – Irewolede Estate",
    "New House – Irewolede Estate",
    "GRA Quarters – Trove Street, Flower Garden, GRA",
    "Honourable Qtrs 1 – Legislative Qtrs Estate",
    "Honourable Qtrs 2 – Legislative Qtrs Estate",
    "Yellow House – Mandate III Estate",
    "Ghosh House – Mandate III Estate",
    "Jaspal House – Mandate III Estate",
    "Ofa Garage",
];

pub const ACCOMMODATION_ISSUES: &[&str] = &[
    "Generator",
    "Water/Plumbing",
    "Electrical (ACs, lighting etc.)",
    "Furniture",
    "Environment (weed, fence, drainage etc.)",
    SUB_CATEGORY_OTHERS,
];

/// Sub-categories of `category`, or `None` for an unknown category.
pub fn sub_categories(category: &str) -> Option<&'static [&'static str]> {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, subs)| *subs)
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub name: &'static str,
    pub sub_categories: &'static [&'static str],
}

/// Everything the submission form needs to render its dropdowns.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub categories: Vec<CategoryOption>,
    pub departments: &'static [&'static str],
    pub staff_locations: &'static [&'static str],
    pub accommodation_locations: &'static [&'static str],
    pub accommodation_issues: &'static [&'static str],
}

pub fn form_options() -> FormOptions {
    FormOptions {
        categories: CATEGORIES
            .iter()
            .map(|(name, subs)| CategoryOption {
                name: *name,
                sub_categories: *subs,
            })
            .collect(),
        departments: DEPARTMENTS,
        staff_locations: STAFF_LOCATIONS,
        accommodation_locations: ACCOMMODATION_LOCATIONS,
        accommodation_issues: ACCOMMODATION_ISSUES,
    }
}
