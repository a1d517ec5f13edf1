//! Prompt text and structured-output schemas sent to the provider

use serde_json::{Value, json};

use crate::models::Category;

pub const PLACES_PER_SEARCH: usize = 6;

pub const CHAT_FALLBACK: &str =
    "Sorry, I'm having some technical difficulties. Please try again later! 🐨";

pub const CHAT_EMPTY_REPLY: &str = "I'm having trouble responding right now. Please try again!";

pub fn places_prompt(location: &str, category: Category, query: Option<&str>) -> String {
    let search = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => format!("{category} in {location} {query}"),
        None => format!("best {category} in {location}"),
    };

    format!(
        "Use web search to find current, real {search}. I need authentic, up-to-date information about actual places that exist in {location}.

Search the web for the top {PLACES_PER_SEARCH} real {category} in {location} and provide:
- Actual business names (not generic names)
- Verified addresses that exist
- Real ratings from review sites
- Current operating hours and status
- Accurate pricing information
- Authentic descriptions from their websites or reviews
- A photo URL for each place when one is available

IMPORTANT: Only include places that actually exist and are currently operating. Use current web search results to verify all information.

Format the response as a JSON array of objects with these exact fields:
{{
  \"name\": string,
  \"category\": \"{category}\",
  \"rating\": number,
  \"distance\": string,
  \"price\": string,
  \"description\": string,
  \"openNow\": boolean,
  \"address\": string,
  \"phone\": string,
  \"website\": string,
  \"imageUrl\": string
}}

Only return valid, real places with accurate information. Prioritize highly-rated, popular establishments."
    )
}

pub fn places_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "category": { "type": "STRING" },
                "rating": { "type": "NUMBER" },
                "distance": { "type": "STRING" },
                "price": { "type": "STRING" },
                "description": { "type": "STRING" },
                "openNow": { "type": "BOOLEAN" },
                "address": { "type": "STRING" },
                "phone": { "type": "STRING" },
                "website": { "type": "STRING" },
                "imageUrl": { "type": "STRING" }
            },
            "required": [
                "name", "category", "rating", "distance", "price",
                "description", "openNow", "address"
            ]
        }
    })
}

pub fn chat_system_prompt(location: Option<&str>, context: Option<&str>) -> String {
    let location = location.map(str::trim).filter(|l| !l.is_empty()).unwrap_or("Not specified");
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("General travel chat");

    format!(
        "You are Travel Buddy, a friendly AI travel assistant with the personality of a wise, adventurous koala. You help users discover amazing places to visit.

IMPORTANT: Only provide information about places that actually exist and are currently operating.

Your personality:
- Friendly and enthusiastic about travel
- Knowledgeable about different locations
- Helpful in providing travel recommendations with verified information
- Use emojis occasionally but don't overdo it
- Keep responses conversational and engaging

Current user location: {location}
Context: {context}

When recommending places, make sure they:
- Actually exist with real addresses
- Are currently operating
- Have authentic reviews and ratings
- Come with accurate contact information and hours

Respond naturally to the user's message with verified, current information."
    )
}

pub fn location_prompt(name: &str) -> String {
    format!(
        "Provide information about the location: \"{name}\"

Include:
- A brief description of the location
- Approximate coordinates (latitude and longitude)
- Any notable features or characteristics

Format as JSON:
{{
  \"name\": string,
  \"description\": string,
  \"coordinates\": {{ \"lat\": number, \"lng\": number }}
}}"
    )
}

pub fn location_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "coordinates": {
                "type": "OBJECT",
                "properties": {
                    "lat": { "type": "NUMBER" },
                    "lng": { "type": "NUMBER" }
                }
            }
        }
    })
}
