use crate::crypto::error::{CipherError, CipherResult};

/// Polynomial over GF(2): bit `i` is the coefficient of `x^i`.
pub type Poly = u64;

const X: Poly = 0b10;

/// Degree of `p`, `-1` for the zero polynomial.
pub fn degree(p: Poly) -> i32 {
    63 - p.leading_zeros() as i32
}

pub fn poly_add(a: Poly, b: Poly) -> Poly {
    a ^ b
}

/// Carry-less product. The caller keeps `degree(a) + degree(b) < 64`.
pub fn poly_mul(a: Poly, mut b: Poly) -> Poly {
    let mut result = 0;
    let mut shifted = a;
    while b != 0 {
        if b & 1 != 0 {
            result ^= shifted;
        }
        shifted <<= 1;
        b >>= 1;
    }
    result
}

pub fn poly_divmod(dividend: Poly, divisor: Poly) -> CipherResult<(Poly, Poly)> {
    if divisor == 0 {
        return Err(CipherError::invalid_argument("polynomial division by zero"));
    }

    let divisor_degree = degree(divisor);
    let mut quotient = 0;
    let mut remainder = dividend;
    while degree(remainder) >= divisor_degree {
        let shift = degree(remainder) - divisor_degree;
        quotient |= 1 << shift;
        remainder ^= divisor << shift;
    }
    Ok((quotient, remainder))
}

/// Remainder of `a` by a non-zero `modulus`; a zero modulus leaves `a` as is.
pub fn poly_mod(a: Poly, modulus: Poly) -> Poly {
    poly_divmod(a, modulus).map_or(a, |(_, remainder)| remainder)
}

pub fn poly_mulmod(a: Poly, b: Poly, modulus: Poly) -> Poly {
    poly_mod(poly_mul(poly_mod(a, modulus), poly_mod(b, modulus)), modulus)
}

pub fn poly_powmod(base: Poly, mut exp: u64, modulus: Poly) -> Poly {
    let mut result = poly_mod(1, modulus);
    let mut base = poly_mod(base, modulus);
    while exp > 0 {
        if exp & 1 != 0 {
            result = poly_mulmod(result, base, modulus);
        }
        base = poly_mulmod(base, base, modulus);
        exp >>= 1;
    }
    result
}

pub fn poly_gcd(mut a: Poly, mut b: Poly) -> Poly {
    while b != 0 {
        let remainder = poly_mod(a, b);
        a = b;
        b = remainder;
    }
    a
}

/// `x^(2^k) mod modulus` by `k` squarings.
fn frobenius(k: i32, modulus: Poly) -> Poly {
    (0..k).fold(poly_mod(X, modulus), |acc, _| poly_mulmod(acc, acc, modulus))
}

fn prime_divisors(mut n: i32) -> Vec<i32> {
    let mut primes = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            primes.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

/// Rabin's test: `p` of degree `m` is irreducible iff `x^(2^m) = x (mod p)`
/// and `gcd(p, x^(2^(m/r)) - x) = 1` for every prime `r` dividing `m`.
/// Degrees up to 31 are supported.
pub fn is_irreducible(p: Poly) -> bool {
    let m = degree(p);
    if !(1..32).contains(&m) {
        return false;
    }

    if frobenius(m, p) != poly_mod(X, p) {
        return false;
    }

    prime_divisors(m).into_iter().all(|r| {
        let power = frobenius(m / r, p);
        poly_gcd(p, poly_add(power, X)) == 1
    })
}

/// Irreducible and of degree 8, i.e. usable as a GF(2^8) modulus.
pub fn is_field_modulus(p: u16) -> bool {
    degree(p as Poly) == 8 && is_irreducible(p as Poly)
}

/// All irreducible polynomials of the given degree, in ascending order.
pub fn list_irreducibles(n: i32) -> Vec<Poly> {
    if !(1..32).contains(&n) {
        return Vec::new();
    }
    let lead: Poly = 1 << n;
    (0..lead)
        .map(|tail| lead | tail)
        .filter(|&p| is_irreducible(p))
        .collect()
}

/// The 30 moduli that define GF(2^8).
pub fn irreducible_polynomials() -> Vec<u16> {
    (0x100u16..0x200).filter(|&p| is_field_modulus(p)).collect()
}

const MAX_FACTOR_DEGREE: i32 = 15;

/// Splits `p` into irreducible factors, smallest first, with multiplicity.
/// `0` and `1` factor to themselves.
pub fn factorize(p: Poly) -> CipherResult<Vec<Poly>> {
    if degree(p) > MAX_FACTOR_DEGREE {
        return Err(CipherError::invalid_argument(format!(
            "factorization supports degree <= {MAX_FACTOR_DEGREE}, got {}",
            degree(p)
        )));
    }
    if p <= 1 {
        return Ok(vec![p]);
    }

    let mut factors = Vec::new();
    let mut rest = p;
    let mut candidate = X;
    while degree(rest) > 0 {
        if 2 * degree(candidate) > degree(rest) {
            factors.push(rest);
            break;
        }
        let (quotient, remainder) = poly_divmod(rest, candidate)?;
        if remainder == 0 && is_irreducible(candidate) {
            factors.push(candidate);
            rest = quotient;
        } else {
            candidate += 1;
        }
    }
    Ok(factors)
}
