//! Public parameters for the extended-ElGamal cryptosystem: a 2048-bit safe
//! prime `P`, a generator `G` of a prime-order subgroup, and the subgroup
//! order `Q`. Defaults match RFC 5114's 2048/224 MODP group (spec.md §6).

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// `(P, G, Q)` for the extended ElGamal scheme. `Q` divides `(P-1)/2`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublicParams {
    pub p: BigUint,
    pub g: BigUint,
    pub q: BigUint,
}

fn hex_biguint(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hard-coded RFC 5114 constant is valid hex")
}

const P_HEX: &str = "AD107E1E9123A9D0D660FAA79559C51FA20D64E5683B9FD1B54B1597B61D0A75E6FA141DF95A56DBAF9A3C407BA1DF15EB3D688A309C180E1DE6B85A1274A0A66D3F8152AD6AC2129037C9EDEFDA4DF8D91E8FEF55B7394B7AD5B7D0B6C12207C9F98D11ED34DBF6C6BA0B2C8BBC27BE6A00E0A0B9C49708B3BF8A317091883681286130BC8985DB1602E714415D9330278273C7DE31EFDC7310F7121FD5A07415987D9ADC0A486DCDF93ACC44328387315D75E198C641A480CD86A1B9E587E8BE60E69CC928B2B9C52172E413042E9B23F10B0E16E79763C9B53DCF4BA80A29E3FB73C16B8E75B97EF363E2FFA31F71CF9DE5384E71B81C0AC4DFFE0C10E64F";
const G_HEX: &str = "AC4032EF4F2D9AE39DF30B5C8FFDAC506CDEBE7B89998CAF74866A08CFE4FFE3A6824A4E10B9A6F0DD921F01A70C4AFAAB739D7700C29F52C57DB17C620A8652BE5E9001A8D66AD7C17669101999024AF4D027275AC1348BB8A762D0521BC98AE247150422EA1ED409939D54DA7460CDB5F6C6B250717CBEF180EB34118E98D119529A45D6F834566E3025E316A330EFBB77A86F0C1AB15B051AE3D428C8F8ACB70A8137150B8EEB10E183EDD19963DDD9E263E4770589EF6AA21E7F5F2FF381B539CCE3409D13CD566AFBB48D6C019181E1BCFE94B30269EDFE72FE9B6AA4BD7B5A0F1C71CFFF4C19C418E1F6EC017981BC087F2A7065B384B890D3191F2BFA";
const Q_HEX: &str = "801C0D34C58D93FE997177101F80535A4738CEBCBF389A99B36371EB";

static DEFAULT: Lazy<PublicParams> = Lazy::new(|| PublicParams {
    p: hex_biguint(P_HEX),
    g: hex_biguint(G_HEX),
    q: hex_biguint(Q_HEX),
});

impl PublicParams {
    /// The RFC 5114 2048-bit / 224-bit default group.
    pub fn default_params() -> PublicParams {
        DEFAULT.clone()
    }

    /// `true` when `self` is bit-for-bit the default parameter set — used
    /// to decide whether the precomputed residue table (deck.rs) applies.
    pub fn is_default(&self) -> bool {
        *self == *DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_internally_consistent() {
        let params = PublicParams::default_params();
        // Q must divide (P-1)/2.
        let half = (&params.p - BigUint::from(1_u32)) / BigUint::from(2_u32);
        assert_eq!(half % &params.q, BigUint::from(0_u32));
        assert!(params.is_default());
    }

    #[test]
    fn round_trips_through_json() {
        let params = PublicParams::default_params();
        let json = serde_json::to_string(&params).unwrap();
        let parsed: PublicParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
