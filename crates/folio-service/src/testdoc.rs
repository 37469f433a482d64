//! Shared fixture: the catalog document the service test suites load.
//!
//! Mirrors the engine's fixture matrix so numbers line up across crates:
//! Bond 60/80gsm, Coated 100gsm, Perfect bound + Spiral, four add-ons,
//! quantity 100..=5000 step 50, tiers 0% / 5% / 10%.

pub(crate) const FIXTURE_CATALOG_JSON: &str = r#"{
  "productId": "a5-book",
  "bookSize": "A5",
  "paperTypes": [
    {
      "name": "Bond",
      "weights": [
        { "grams": 60, "printModes": ["bw"] },
        { "grams": 80, "printModes": ["bw", "color"] }
      ]
    },
    {
      "name": "Coated",
      "weights": [
        { "grams": 100, "printModes": ["color"] }
      ]
    }
  ],
  "bindingTypes": [
    {
      "name": "Perfect bound",
      "unitPrice": 1500,
      "coverWeights": [
        { "grams": 250, "unitPrice": 900 },
        { "grams": 300, "unitPrice": 1200 }
      ]
    },
    {
      "name": "Spiral",
      "unitPrice": 800,
      "coverWeights": [
        { "grams": 200, "unitPrice": 500 }
      ]
    }
  ],
  "addOns": [
    { "name": "Shrink wrap", "unitPrice": 400, "kind": "flat" },
    { "name": "Gloss lamination", "unitPrice": 5000, "kind": "page_based", "pageStep": 16 },
    { "name": "Colour proofing", "unitPrice": 2000, "kind": "page_based", "pageStep": 8, "pageScope": "color_only" },
    { "name": "Hole punching", "unitPrice": 300, "kind": "flat", "eligibleBindings": ["Spiral"] }
  ],
  "quantity": { "minimum": 100, "maximum": 5000, "step": 50 },
  "pageRates": [
    { "paperType": "Bond", "grams": 60, "printMode": "bw", "perPageBw": 10 },
    { "paperType": "Bond", "grams": 80, "printMode": "bw", "perPageBw": 12 },
    { "paperType": "Bond", "grams": 80, "printMode": "color", "perPageColor": 40 },
    { "paperType": "Bond", "grams": 80, "printMode": "mixed", "perPageBw": 12, "perPageColor": 45 },
    { "paperType": "Coated", "grams": 100, "printMode": "color", "perPageColor": 55 }
  ],
  "discountTiers": [
    { "minQuantity": 100, "maxQuantity": 499, "rateBps": 0 },
    { "minQuantity": 500, "maxQuantity": 999, "rateBps": 500 },
    { "minQuantity": 1000, "rateBps": 1000 }
  ]
}"#;
