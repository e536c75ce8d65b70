// utils/rewards.rs
use crate::models::businessmodel::Reward;

/// Points still needed for the cheapest reward the balance cannot yet cover.
/// Zero when every reward is affordable, or when there are none.
pub fn points_to_next_reward(current_points: i32, rewards: &[Reward]) -> i32 {
    let mut sorted: Vec<&Reward> = rewards.iter().collect();
    sorted.sort_by_key(|r| r.points_required);

    for reward in sorted {
        if reward.points_required > current_points {
            return reward.points_required - current_points;
        }
    }

    0
}
