//! The fixed dork catalog.
//!
//! Every query is a `site:` dork scoped to the hosted platform domain,
//! combined with a category keyword to vary which storefronts surface.
//! The catalog is immutable input data; dorks carry no per-dork state.

/// Crafted search queries targeting platform-hosted storefronts.
pub const DORKS: &[&str] = &[
    "site:myshopify.com",
    "site:myshopify.com store",
    "site:myshopify.com shop",
    "site:myshopify.com buy",
    "site:myshopify.com products",
    "site:myshopify.com collection",
    "site:myshopify.com cart",
    "site:myshopify.com checkout",
    "site:myshopify.com new",
    "site:myshopify.com sale",
    "site:myshopify.com deals",
    "site:myshopify.com best seller",
    "site:myshopify.com trending",
    "site:myshopify.com popular",
    "site:myshopify.com gift",
    "site:myshopify.com bundle",
    "site:myshopify.com makeup",
    "site:myshopify.com cosmetics",
    "site:myshopify.com beauty products",
    "site:myshopify.com clothing",
    "site:myshopify.com fashion",
    "site:myshopify.com apparel",
    "site:myshopify.com shoes",
    "site:myshopify.com accessories",
    "site:myshopify.com jewelry",
    "site:myshopify.com electronics",
    "site:myshopify.com gadgets",
    "site:myshopify.com home decor",
    "site:myshopify.com furniture",
    "site:myshopify.com pet supplies",
    "site:myshopify.com toys",
    "site:myshopify.com games",
    "site:myshopify.com books",
    "site:myshopify.com stationery",
    "site:myshopify.com office",
    "site:myshopify.com garden",
    "site:myshopify.com plant",
    "site:myshopify.com food",
    "site:myshopify.com gourmet",
    "site:myshopify.com coffee",
    "site:myshopify.com tea",
    "site:myshopify.com chocolate",
    "site:myshopify.com snack",
    "site:myshopify.com organic",
    "site:myshopify.com vegan",
    "site:myshopify.com natural",
    "site:myshopify.com eco",
    "site:myshopify.com sustainable",
    "site:myshopify.com green",
    "site:myshopify.com wellness",
    "site:myshopify.com health",
    "site:myshopify.com vitamin",
    "site:myshopify.com supplement",
    "site:myshopify.com fitness",
    "site:myshopify.com sports",
    "site:myshopify.com outdoor",
    "site:myshopify.com camping",
    "site:myshopify.com hiking",
    "site:myshopify.com yoga",
    "site:myshopify.com gym",
    "site:myshopify.com car",
    "site:myshopify.com auto",
    "site:myshopify.com motorcycle",
    "site:myshopify.com bike",
    "site:myshopify.com travel",
    "site:myshopify.com luggage",
    "site:myshopify.com photography",
    "site:myshopify.com camera",
    "site:myshopify.com music",
    "site:myshopify.com instrument",
    "site:myshopify.com audio",
    "site:myshopify.com headphone",
    "site:myshopify.com speaker",
    "site:myshopify.com art",
    "site:myshopify.com craft",
    "site:myshopify.com handmade",
    "site:myshopify.com vintage",
    "site:myshopify.com antique",
    "site:myshopify.com collectible",
];
