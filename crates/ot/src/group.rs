//! Fixed public group parameters and modular arithmetic
//!
//! Both protocol sides share one immutable parameter set. Value arithmetic is
//! performed mod `n`; exponent (blinding-factor) arithmetic mod `phi`, so
//! `g^x * g^y == g^((x + y) mod phi)` holds exactly. `phi` is a public
//! constant of this group, not a secret.

use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};

/// Default generator
const DEFAULT_G: &[u8] = b"9020881489161854992071763483314773468341853433975756385639545080944698236944020124874820917267762049756743282301106459062535797137327360192691469027152272";

/// Default modulus (1024-bit composite)
const DEFAULT_N: &[u8] = b"102724610959913950919762303151320427896415051258714708724768326174083057407299433043362228762657118029566890747043004760241559786931866234640457856691885212534669604964926915306738569799518792945024759514373214412797317972739022405456550476153212687312211184540248262330559143446510677062823907392904449451177";

/// Euler's totient of the default modulus
const DEFAULT_PHI: &[u8] = b"102724610959913950919762303151320427896415051258714708724768326174083057407299433043362228762657118029566890747043004760241559786931866234640457856691885192126363163670343672910761259882348623401714459980712242233796355982147797162316532450768783823909695360736554767341443201861573989081253763975895939627220";

/// Public group parameters shared by requester and holder.
///
/// Created once per process and passed to every component; deployments and
/// tests may substitute their own parameter set. `gcd(g, n) == 1` is an
/// invariant of the configuration and is not checked at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParams {
    pub g: BigUint,
    pub n: BigUint,
    pub phi: BigUint,
}

impl Default for GroupParams {
    fn default() -> Self {
        Self {
            g: BigUint::parse_bytes(DEFAULT_G, 10).expect("valid generator constant"),
            n: BigUint::parse_bytes(DEFAULT_N, 10).expect("valid modulus constant"),
            phi: BigUint::parse_bytes(DEFAULT_PHI, 10).expect("valid totient constant"),
        }
    }
}

impl GroupParams {
    /// `g^e mod n`
    pub fn commit(&self, e: &BigUint) -> BigUint {
        self.g.modpow(e, &self.n)
    }

    /// `base^exp mod n`
    pub fn power(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        base.modpow(exp, &self.n)
    }

    /// `(x * y) mod phi`, the exponent-domain product
    pub fn mul_mod_order(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.phi
    }

    /// `(x * y) mod n`
    pub fn mul_mod_n(&self, x: &BigUint, y: &BigUint) -> BigUint {
        (x * y) % &self.n
    }

    /// `(x - y) mod phi`, the exponent-domain difference, wrapping below zero
    pub fn sub_mod_order(&self, x: &BigUint, y: &BigUint) -> BigUint {
        let x = x % &self.phi;
        let y = y % &self.phi;
        if x >= y {
            x - y
        } else {
            &self.phi - y + x
        }
    }

    /// Uniform scalar in `[0, n)` from a cryptographically secure generator
    pub fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&self.n)
    }
}
