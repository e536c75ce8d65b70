// utils/otp_generator.rs
use rand::Rng;

pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    format!("{:04}", rng.random_range(1000..10000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_four_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 4);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(otp.chars().next(), Some('0'));
        }
    }
}
