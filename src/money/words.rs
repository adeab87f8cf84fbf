//! Spelling out amounts in Russian words, as printed on invoices:
//! `1234.50` becomes "Одна тысяча двести тридцать четыре тенге 50 тиын".
//!
//! Russian counts pick one of three noun forms depending on the last two
//! digits of the count, and "тысяча" is feminine, so the ones word in the
//! thousands group agrees with it ("одна тысяча", "две тысячи").
use crate::money::{Amount, InvalidAmount};

/// Integer parts at or above this value cannot be spelled out.
pub const WORDS_LIMIT: u64 = 1_000_000_000;

/// Phrase used when both the integer and the fractional part are zero.
pub const ZERO_PHRASE: &str = "Ноль тенге 00 тиын";

/// Minor-unit word. It is not declined.
const TIYN: &str = "тиын";

const ZERO: &str = "ноль";

const ONES: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];

const ONES_FEMININE: [&str; 10] = [
    "", "одна", "две", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];

const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];

const TENS: [&str; 10] = [
    "", "", "двадцать", "тридцать", "сорок", "пятьдесят", "шестьдесят", "семьдесят",
    "восемьдесят", "девяносто",
];

const HUNDREDS: [&str; 10] = [
    "", "сто", "двести", "триста", "четыреста", "пятьсот", "шестьсот", "семьсот",
    "восемьсот", "девятьсот",
];

/// Word forms of each magnitude, indexed by [`Magnitude`] then [`PluralForm`].
static MAGNITUDE_FORMS: [[&str; 3]; 3] = [
    ["тенге", "тенге", "тенге"],
    ["тысяча", "тысячи", "тысяч"],
    ["миллион", "миллиона", "миллионов"],
];

/// The three noun forms a Russian count can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralForm {
    /// 1, 21, 101, but not 11.
    One = 0,
    /// 2–4, 22–24, but not 12–14.
    Few = 1,
    /// Everything else, including 11–14.
    Many = 2,
}

impl PluralForm {
    /// Selects the form for a count from its last one and two digits.
    pub fn for_count(n: u64) -> Self {
        let last_digit = n % 10;
        let last_two = n % 100;
        if last_digit == 1 && last_two != 11 {
            PluralForm::One
        } else if (2..=4).contains(&last_digit) && !(12..=14).contains(&last_two) {
            PluralForm::Few
        } else {
            PluralForm::Many
        }
    }
}

/// The word families that follow a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Currency = 0,
    Thousands = 1,
    Millions = 2,
}

impl Magnitude {
    pub fn word(self, form: PluralForm) -> &'static str {
        MAGNITUDE_FORMS[self as usize][form as usize]
    }

    fn gender(self) -> Gender {
        match self {
            Magnitude::Thousands => Gender::Feminine,
            Magnitude::Currency | Magnitude::Millions => Gender::Masculine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Masculine,
    Feminine,
}

/// Pushes the words for `n` in `0..=999` onto `out`. Zero pushes nothing.
fn push_group(out: &mut Vec<&'static str>, n: u64, gender: Gender) {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;
    if hundreds > 0 {
        out.push(HUNDREDS[hundreds]);
    }
    if (10..=19).contains(&rest) {
        out.push(TEENS[rest - 10]);
        return;
    }
    let (tens, ones) = (rest / 10, rest % 10);
    if tens >= 2 {
        out.push(TENS[tens]);
    }
    if ones > 0 {
        out.push(match gender {
            Gender::Masculine => ONES[ones],
            Gender::Feminine => ONES_FEMININE[ones],
        });
    }
}

/// Form of the currency word for a whole-tenge value: it agrees with the
/// lowest non-zero group.
pub fn currency_form(tenge: u64) -> PluralForm {
    let millions = tenge / 1_000_000;
    let thousands = (tenge % 1_000_000) / 1000;
    let ones = tenge % 1000;
    let count = if ones > 0 {
        ones
    } else if thousands > 0 {
        thousands
    } else {
        millions
    };
    PluralForm::for_count(count)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Amount {
    /// Spells the amount out in words, e.g. "Две тысячи тенге 00 тиын".
    pub fn to_words(&self) -> Result<String, InvalidAmount> {
        let tenge = self.tenge();
        if tenge >= WORDS_LIMIT {
            return Err(InvalidAmount::TooLarge(self.as_f64()));
        }
        let fraction = self.fraction();
        if tenge == 0 && fraction == 0 {
            return Ok(ZERO_PHRASE.to_string());
        }

        let millions = tenge / 1_000_000;
        let thousands = (tenge % 1_000_000) / 1000;
        let ones = tenge % 1000;

        let mut words: Vec<&'static str> = Vec::new();
        for (count, magnitude) in [
            (millions, Magnitude::Millions),
            (thousands, Magnitude::Thousands),
        ] {
            if count > 0 {
                push_group(&mut words, count, magnitude.gender());
                words.push(magnitude.word(PluralForm::for_count(count)));
            }
        }
        push_group(&mut words, ones, Magnitude::Currency.gender());
        if words.is_empty() {
            words.push(ZERO);
        }
        words.push(Magnitude::Currency.word(currency_form(tenge)));

        let phrase = format!("{} {:02} {}", words.join(" "), fraction, TIYN);
        Ok(capitalize(&phrase))
    }
}

/// Spells out a floating-point amount of tenge. See [`Amount::to_words`].
pub fn amount_to_words(amount: f64) -> Result<String, InvalidAmount> {
    Amount::from_f64(amount)?.to_words()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(amount: f64) -> String {
        amount_to_words(amount).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(words(0.0), ZERO_PHRASE);
        assert_eq!(words(0.004), ZERO_PHRASE);
    }

    #[test]
    fn test_only_tiyn() {
        assert_eq!(words(0.5), "Ноль тенге 50 тиын");
        assert_eq!(words(0.07), "Ноль тенге 07 тиын");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(words(1.0), "Один тенге 00 тиын");
        assert_eq!(words(2.0), "Два тенге 00 тиын");
        assert_eq!(words(11.0), "Одиннадцать тенге 00 тиын");
        assert_eq!(words(21.0), "Двадцать один тенге 00 тиын");
        assert_eq!(words(40.0), "Сорок тенге 00 тиын");
        assert_eq!(words(115.0), "Сто пятнадцать тенге 00 тиын");
        assert_eq!(words(999.0), "Девятьсот девяносто девять тенге 00 тиын");
    }

    #[test]
    fn test_plural_forms() {
        assert_eq!(PluralForm::for_count(1), PluralForm::One);
        for n in 2..=4 {
            assert_eq!(PluralForm::for_count(n), PluralForm::Few, "{n}");
        }
        for n in 5..=20 {
            assert_eq!(PluralForm::for_count(n), PluralForm::Many, "{n}");
        }
        assert_eq!(PluralForm::for_count(21), PluralForm::One);
        assert_eq!(PluralForm::for_count(22), PluralForm::Few);
        assert_eq!(PluralForm::for_count(111), PluralForm::Many);
        assert_eq!(PluralForm::for_count(112), PluralForm::Many);
        assert_eq!(PluralForm::for_count(0), PluralForm::Many);
    }

    #[test]
    fn test_currency_form_teen_exception() {
        assert_eq!(currency_form(1), PluralForm::One);
        for n in 2..=4 {
            assert_eq!(currency_form(n), PluralForm::Few, "{n}");
        }
        for n in 11..=14 {
            assert_eq!(currency_form(n), PluralForm::Many, "{n}");
        }
        assert_eq!(currency_form(21), PluralForm::One);
    }

    #[test]
    fn test_currency_form_uses_lowest_nonzero_group() {
        assert_eq!(currency_form(3000), PluralForm::Few);
        assert_eq!(currency_form(1_000_000), PluralForm::One);
        assert_eq!(currency_form(5_000_002), PluralForm::Few);
    }

    #[test]
    fn test_thousands_are_feminine() {
        assert_eq!(words(1000.0), "Одна тысяча тенге 00 тиын");
        assert_eq!(words(2000.0), "Две тысячи тенге 00 тиын");
        assert_eq!(words(5000.0), "Пять тысяч тенге 00 тиын");
        assert_eq!(words(11_000.0), "Одиннадцать тысяч тенге 00 тиын");
        assert_eq!(words(21_000.0), "Двадцать одна тысяча тенге 00 тиын");
        assert_eq!(words(22_000.0), "Двадцать две тысячи тенге 00 тиын");
    }

    #[test]
    fn test_millions_are_masculine() {
        assert_eq!(words(1_000_000.0), "Один миллион тенге 00 тиын");
        assert_eq!(words(2_000_000.0), "Два миллиона тенге 00 тиын");
        assert_eq!(
            words(12_345_678.0),
            "Двенадцать миллионов триста сорок пять тысяч шестьсот семьдесят восемь тенге 00 тиын"
        );
        assert_eq!(
            words(2_001_001.0),
            "Два миллиона одна тысяча один тенге 00 тиын"
        );
    }

    #[test]
    fn test_fraction_is_two_digits() {
        assert_eq!(
            words(1234.5),
            "Одна тысяча двести тридцать четыре тенге 50 тиын"
        );
        assert_eq!(words(3.05), "Три тенге 05 тиын");
    }

    #[test]
    fn test_rounding_carry() {
        assert_eq!(words(999.995), "Одна тысяча тенге 00 тиын");
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(words(987_654.32), words(987_654.32));
    }

    #[test]
    fn test_limits() {
        assert!(amount_to_words(999_999_999.99).is_ok());
        assert!(matches!(
            amount_to_words(1_000_000_000.0),
            Err(InvalidAmount::TooLarge(_))
        ));
        assert!(matches!(
            amount_to_words(-5.0),
            Err(InvalidAmount::Negative(_))
        ));
        assert!(matches!(
            amount_to_words(f64::NAN),
            Err(InvalidAmount::NotFinite(_))
        ));
    }
}
