// ABOUTME: Idempotent demo data for local development and manual testing
// ABOUTME: Seeds lifestyles, experience tiers, ingredients, recipes with joins, and demo users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use super::{Database, NewRecipe, NewUser};
use crate::constants::lifestyle::RESTRICTIVE_LIFESTYLE_ID;
use crate::errors::AppResult;
use pantry_chef_core::models::{IngredientId, UserId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Omnivore lifestyle id used by the demo catalog
const OMNIVORE_LIFESTYLE_ID: i64 = 2;

const LIFESTYLES: &[(i64, &str)] = &[
    (RESTRICTIVE_LIFESTYLE_ID, "Plant-based"),
    (OMNIVORE_LIFESTYLE_ID, "Omnivore"),
];

const EXPERIENCE_LEVELS: &[(i64, &str)] = &[(0, "Beginner"), (1, "Home cook"), (2, "Advanced")];

const INGREDIENTS: &[&str] = &[
    "egg",
    "milk",
    "butter",
    "flour",
    "tomato",
    "onion",
    "garlic",
    "spinach",
    "rice",
    "chicken breast",
    "peanut",
    "tofu",
    "bell pepper",
    "pasta",
    "basil",
    "lemon",
];

struct DemoRecipe {
    name: &'static str,
    description: &'static str,
    steps: &'static str,
    calories: f64,
    minutes: i64,
    lifestyle_id: i64,
    experience_level_id: i64,
    ingredients: &'static [&'static str],
}

const RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        name: "Spinach Omelette",
        description: "Fluffy eggs folded over wilted spinach",
        steps: "Whisk eggs with milk. Wilt spinach in butter. Pour eggs, fold, serve.",
        calories: 320.0,
        minutes: 15,
        lifestyle_id: OMNIVORE_LIFESTYLE_ID,
        experience_level_id: 0,
        ingredients: &["egg", "milk", "butter", "spinach"],
    },
    DemoRecipe {
        name: "Chicken Fried Rice",
        description: "Day-old rice tossed with chicken and vegetables",
        steps: "Sear chicken. Fry onion, garlic and pepper. Add rice and egg, toss.",
        calories: 540.0,
        minutes: 25,
        lifestyle_id: OMNIVORE_LIFESTYLE_ID,
        experience_level_id: 1,
        ingredients: &["rice", "chicken breast", "egg", "onion", "garlic", "bell pepper"],
    },
    DemoRecipe {
        name: "Tomato Basil Pasta",
        description: "Quick pan sauce of fresh tomato and basil",
        steps: "Boil pasta. Soften garlic, add tomato, reduce, toss with pasta and basil.",
        calories: 480.0,
        minutes: 20,
        lifestyle_id: OMNIVORE_LIFESTYLE_ID,
        experience_level_id: 0,
        ingredients: &["pasta", "tomato", "garlic", "basil"],
    },
    DemoRecipe {
        name: "Peanut Tofu Stir-fry",
        description: "Crispy tofu in a peanut glaze",
        steps: "Press and fry tofu. Stir-fry pepper and onion. Glaze with peanut sauce.",
        calories: 450.0,
        minutes: 30,
        lifestyle_id: RESTRICTIVE_LIFESTYLE_ID,
        experience_level_id: 1,
        ingredients: &["tofu", "peanut", "bell pepper", "onion", "garlic"],
    },
    DemoRecipe {
        name: "Lemon Garlic Rice",
        description: "Bright, herby rice side",
        steps: "Toast garlic, add rice and water, finish with lemon.",
        calories: 260.0,
        minutes: 25,
        lifestyle_id: RESTRICTIVE_LIFESTYLE_ID,
        experience_level_id: 0,
        ingredients: &["rice", "garlic", "lemon"],
    },
    DemoRecipe {
        name: "Stuffed Peppers",
        description: "Peppers baked with seasoned rice and tomato",
        steps: "Hollow peppers. Mix rice, tomato, onion. Stuff and bake for 40 minutes.",
        calories: 390.0,
        minutes: 55,
        lifestyle_id: RESTRICTIVE_LIFESTYLE_ID,
        experience_level_id: 2,
        ingredients: &["bell pepper", "rice", "tomato", "onion", "garlic"],
    },
    DemoRecipe {
        name: "Crepes",
        description: "Thin French pancakes",
        steps: "Whisk flour, egg, milk and melted butter. Rest. Cook thin rounds.",
        calories: 300.0,
        minutes: 35,
        lifestyle_id: OMNIVORE_LIFESTYLE_ID,
        experience_level_id: 2,
        ingredients: &["flour", "egg", "milk", "butter"],
    },
];

/// Counts of what the seeder touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Ingredients present after seeding
    pub ingredients: usize,
    /// Recipes newly inserted in this run
    pub recipes_created: usize,
    /// Demo users present after seeding
    pub users: usize,
}

/// Populate the store with the demo catalog; safe to run repeatedly
///
/// # Errors
///
/// Returns an error if any write fails
pub async fn seed_demo_data(db: &Database) -> AppResult<SeedSummary> {
    for (id, name) in LIFESTYLES {
        db.upsert_lifestyle(*id, name).await?;
    }
    for (id, name) in EXPERIENCE_LEVELS {
        db.upsert_experience_level(*id, name).await?;
    }

    let mut ingredient_ids: HashMap<&str, IngredientId> = HashMap::new();
    for name in INGREDIENTS {
        ingredient_ids.insert(*name, db.upsert_ingredient(name).await?);
    }

    let mut recipes_created = 0;
    for demo in RECIPES {
        if db.find_recipe_id_by_name(demo.name).await?.is_some() {
            debug!(recipe = demo.name, "Demo recipe already present");
            continue;
        }
        let ids: Vec<IngredientId> = demo
            .ingredients
            .iter()
            .filter_map(|name| ingredient_ids.get(name).copied())
            .collect();
        db.create_recipe(
            &NewRecipe {
                name: demo.name.to_owned(),
                ingredients_text: demo.ingredients.join(", "),
                description: demo.description.to_owned(),
                steps: demo.steps.to_owned(),
                calories: demo.calories,
                minutes: demo.minutes,
                lifestyle_id: demo.lifestyle_id,
                experience_level_id: demo.experience_level_id,
            },
            &ids,
        )
        .await?;
        recipes_created += 1;
    }

    let omnivore = seed_user(
        db,
        "Olive Omnivore",
        "olive@pantry-chef.local",
        OMNIVORE_LIFESTYLE_ID,
        1,
    )
    .await?;
    if let Some(peanut) = ingredient_ids.get("peanut") {
        db.add_user_allergy(omnivore, *peanut).await?;
    }
    seed_user(
        db,
        "Pat Plantbased",
        "pat@pantry-chef.local",
        RESTRICTIVE_LIFESTYLE_ID,
        0,
    )
    .await?;

    let summary = SeedSummary {
        ingredients: ingredient_ids.len(),
        recipes_created,
        users: 2,
    };
    info!(
        ingredients = summary.ingredients,
        recipes_created = summary.recipes_created,
        users = summary.users,
        "Demo data seeded"
    );
    Ok(summary)
}

async fn seed_user(
    db: &Database,
    name: &str,
    email: &str,
    lifestyle_id: i64,
    experience_level_id: i64,
) -> AppResult<UserId> {
    db.upsert_user(&NewUser {
        name: name.to_owned(),
        email: email.to_owned(),
        lifestyle_id,
        experience_level_id,
    })
    .await
}
