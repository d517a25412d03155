use anyhow::Context;
use bytes::Bytes;
use time::macros::format_description;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::MealType;
use crate::state::AppState;

const PHOTO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Meal type guessed from the clock: 05:00-11:00 breakfast, 11:00-16:00
/// lunch, everything else dinner. Snacks are always explicit.
pub fn default_meal_type(at: OffsetDateTime) -> MealType {
    let hhmm = u32::from(at.hour()) * 60 + u32::from(at.minute());
    if (5 * 60..11 * 60).contains(&hhmm) {
        MealType::Breakfast
    } else if (11 * 60..16 * 60).contains(&hhmm) {
        MealType::Lunch
    } else {
        MealType::Dinner
    }
}

pub fn photo_ext(filename: &str) -> Option<&'static str> {
    let lower = filename.to_lowercase();
    PHOTO_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(**ext))
        .copied()
}

/// Writes a meal photo under a per-day folder and returns its storage key.
pub async fn store_photo(
    state: &AppState,
    ext: &str,
    data: Vec<u8>,
    now: OffsetDateTime,
) -> anyhow::Result<String> {
    let folder = now
        .date()
        .format(format_description!("[year][month][day]"))
        .context("format day folder")?;
    let key = format!("{}/{}{}", folder, Uuid::new_v4().simple(), ext);
    state.storage.put_object(&key, Bytes::from(data)).await?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn meal_type_defaults_by_hour() {
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 05:00 UTC)),
            MealType::Breakfast
        );
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 10:59 UTC)),
            MealType::Breakfast
        );
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 11:00 UTC)),
            MealType::Lunch
        );
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 15:59 UTC)),
            MealType::Lunch
        );
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 16:00 UTC)),
            MealType::Dinner
        );
        assert_eq!(
            default_meal_type(datetime!(2024-02-15 03:30 UTC)),
            MealType::Dinner
        );
    }

    #[test]
    fn photo_ext_whitelist() {
        assert_eq!(photo_ext("lunch.JPG"), Some(".jpg"));
        assert_eq!(photo_ext("lunch.jpeg"), Some(".jpeg"));
        assert_eq!(photo_ext("lunch.webp"), Some(".webp"));
        assert_eq!(photo_ext("lunch.gif"), None);
        assert_eq!(photo_ext("lunch"), None);
    }
}
