use crate::models::CropActivity;

/// Activities belonging to one crop, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct CropGroup {
    pub crop: String,
    pub activities: Vec<CropActivity>,
}

/// Split activities into per-crop groups.
///
/// Groups appear in order of each crop's first entry; within a group the
/// submission order is kept.
pub fn group_by_crop(activities: &[CropActivity]) -> Vec<CropGroup> {
    let mut groups: Vec<CropGroup> = Vec::new();

    for activity in activities {
        match groups.iter_mut().find(|g| g.crop == activity.crop()) {
            Some(group) => group.activities.push(activity.clone()),
            None => groups.push(CropGroup {
                crop: activity.crop().to_string(),
                activities: vec![activity.clone()],
            }),
        }
    }

    groups
}
