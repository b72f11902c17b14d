use rand::Rng;

use crate::constants::names::{ADJECTIVES, ANIMALS, MAX_ATTEMPTS};

/// Random `adjective-animal` name, e.g. "brave-otter"
pub fn random_list_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let animal = ANIMALS[rng.random_range(0..ANIMALS.len())];
    format!("{adjective}-{animal}")
}

/// Random name not present in `existing`
/// After MAX_ATTEMPTS collisions, numbers the last candidate (`brave-otter-2`, ...).
pub fn unique_list_name<R: Rng + ?Sized>(rng: &mut R, existing: &[String]) -> String {
    let taken = |name: &str| existing.iter().any(|k| k == name);

    let mut candidate = random_list_name(rng);
    for _ in 1..MAX_ATTEMPTS {
        if !taken(&candidate) {
            return candidate;
        }
        candidate = random_list_name(rng);
    }
    if !taken(&candidate) {
        return candidate;
    }

    let mut n = 2;
    loop {
        let numbered = format!("{candidate}-{n}");
        if !taken(&numbered) {
            return numbered;
        }
        n += 1;
    }
}

/// Whether `name` has the generated `adjective-animal` shape
#[cfg(test)]
pub fn is_generated_name(name: &str) -> bool {
    name.split_once('-')
        .is_some_and(|(adj, animal)| ADJECTIVES.contains(&adj) && ANIMALS.contains(&animal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_name_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let name = random_list_name(&mut rng);
            assert!(is_generated_name(&name), "unexpected name {name}");
        }
    }

    #[test]
    fn test_unique_name_avoids_existing() {
        let mut rng = StdRng::seed_from_u64(42);
        // All but one combination taken
        let mut existing: Vec<String> = ADJECTIVES
            .iter()
            .flat_map(|a| ANIMALS.iter().map(move |b| format!("{a}-{b}")))
            .collect();
        existing.retain(|n| n != "noisy-owl");

        let name = unique_list_name(&mut rng, &existing);
        assert!(!existing.contains(&name));
    }

    #[test]
    fn test_unique_name_suffixes_when_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let existing: Vec<String> = ADJECTIVES
            .iter()
            .flat_map(|a| ANIMALS.iter().map(move |b| format!("{a}-{b}")))
            .collect();

        let name = unique_list_name(&mut rng, &existing);
        assert!(name.ends_with("-2"), "expected numbered name, got {name}");
        assert!(!existing.contains(&name));
    }

    #[test]
    fn test_is_generated_name() {
        assert!(is_generated_name("brave-otter"));
        assert!(!is_generated_name("brave"));
        assert!(!is_generated_name("my-list"));
        assert!(!is_generated_name("brave-otter-2"));
    }
}
