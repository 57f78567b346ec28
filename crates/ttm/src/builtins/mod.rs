//! The ~50 built-in primitives, one small module per functional group,
//! mirroring the dispatch-by-enum pattern used for the rest of the builtin
//! library in this codebase.

mod arith;
mod class;
mod dict;
mod introspect;
mod io;
mod scan;
mod strutil;

use strum::{Display, EnumString, IntoStaticStr};

use crate::error::RunError;
use crate::io::{InputSource, OutputSink};
use crate::name::{Dictionary, Name};
use crate::tracer::CallTracer;
use crate::Ttm;

/// Every built-in primitive, dispatched by name lookup in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[expect(clippy::unnecessary_wraps, reason = "dispatch signatures are uniform")]
pub enum Builtin {
    #[strum(serialize = "ds")]
    Ds,
    #[strum(serialize = "ap")]
    Ap,
    #[strum(serialize = "cf")]
    Cf,
    #[strum(serialize = "es")]
    Es,
    #[strum(serialize = "cr")]
    Cr,
    #[strum(serialize = "ss")]
    Ss,
    #[strum(serialize = "sc")]
    Sc,
    #[strum(serialize = "cc")]
    Cc,
    #[strum(serialize = "cn")]
    Cn,
    #[strum(serialize = "sn")]
    Sn,
    #[strum(serialize = "cp")]
    Cp,
    #[strum(serialize = "cs")]
    Cs,
    #[strum(serialize = "scn")]
    Scn,
    #[strum(serialize = "isc")]
    Isc,
    #[strum(serialize = "rrp")]
    Rrp,
    #[strum(serialize = "eos")]
    Eos,
    #[strum(serialize = "gn")]
    Gn,
    #[strum(serialize = "zlc")]
    Zlc,
    #[strum(serialize = "zlcp")]
    Zlcp,
    #[strum(serialize = "flip")]
    Flip,
    #[strum(serialize = "norm")]
    Norm,
    #[strum(serialize = "dcl")]
    Dcl,
    #[strum(serialize = "dncl")]
    Dncl,
    #[strum(serialize = "ecl")]
    Ecl,
    #[strum(serialize = "ccl")]
    Ccl,
    #[strum(serialize = "scl")]
    Scl,
    #[strum(serialize = "tcl")]
    Tcl,
    #[strum(serialize = "ad")]
    Ad,
    #[strum(serialize = "mu")]
    Mu,
    #[strum(serialize = "su")]
    Su,
    #[strum(serialize = "dv")]
    Dv,
    #[strum(serialize = "dvr")]
    Dvr,
    #[strum(serialize = "abs")]
    Abs,
    #[strum(serialize = "eq")]
    Eq,
    #[strum(serialize = "gt")]
    Gt,
    #[strum(serialize = "lt")]
    Lt,
    #[strum(serialize = "eq?")]
    EqP,
    #[strum(serialize = "gt?")]
    GtP,
    #[strum(serialize = "lt?")]
    LtP,
    #[strum(serialize = "ps")]
    Ps,
    #[strum(serialize = "rs")]
    Rs,
    #[strum(serialize = "psr")]
    Psr,
    #[strum(serialize = "pf")]
    Pf,
    #[strum(serialize = "cm")]
    Cm,
    #[strum(serialize = "names")]
    Names,
    #[strum(serialize = "classes")]
    Classes,
    #[strum(serialize = "ndf")]
    Ndf,
    #[strum(serialize = "time")]
    Time,
    #[strum(serialize = "xtime")]
    Xtime,
    #[strum(serialize = "ctime")]
    Ctime,
    #[strum(serialize = "tf")]
    Tf,
    #[strum(serialize = "tn")]
    Tn,
    #[strum(serialize = "lf")]
    Lf,
    #[strum(serialize = "uf")]
    Uf,
    #[strum(serialize = "include")]
    Include,
    #[strum(serialize = "argv")]
    Argv,
    #[strum(serialize = "argc")]
    Argc,
    #[strum(serialize = "exit")]
    Exit,
    #[strum(serialize = "ttm")]
    Ttm,
}

impl Builtin {
    /// `argc - 1 >= minargs` is required for the call to proceed.
    #[must_use]
    pub fn minargs(self) -> usize {
        match self {
            Self::Ds | Self::Es | Self::Cc | Self::Cp | Self::Cs | Self::Rrp | Self::Dcl | Self::Dncl
            | Self::Ecl | Self::Abs | Self::Zlc | Self::Zlcp | Self::Flip | Self::Norm | Self::Cm
            | Self::Tf | Self::Ctime | Self::Lf | Self::Uf | Self::Argv | Self::Ps => 1,
            Self::Ad | Self::Mu | Self::Rs | Self::Pf | Self::Names | Self::Classes | Self::Time
            | Self::Xtime | Self::Argc | Self::Exit | Self::Tn => 0,
            Self::Ap | Self::Cf | Self::Cr | Self::Ss | Self::Sc | Self::Cn | Self::Sn | Self::Gn
            | Self::Ccl | Self::Scl | Self::Su | Self::Dv | Self::Dvr | Self::Psr | Self::Ttm => 2,
            Self::Scn | Self::Eos | Self::Ndf => 3,
            Self::Isc | Self::Tcl | Self::Eq | Self::Gt | Self::Lt | Self::EqP | Self::GtP | Self::LtP => 4,
            Self::Include => 1,
        }
    }

    /// True if the routed result of this call is discarded: pure mutators
    /// with no text to insert or append.
    #[must_use]
    pub fn is_sideeffect(self) -> bool {
        matches!(
            self,
            Self::Ds
                | Self::Ap
                | Self::Cf
                | Self::Es
                | Self::Cr
                | Self::Ss
                | Self::Sn
                | Self::Rrp
                | Self::Dcl
                | Self::Dncl
                | Self::Ecl
                | Self::Scl
                | Self::Ps
                | Self::Pf
                | Self::Cm
                | Self::Tf
                | Self::Tn
                | Self::Lf
                | Self::Uf
                | Self::Include
                | Self::Exit
                | Self::Ttm
        )
    }

    pub(crate) fn call<O: OutputSink, I: InputSource, Tr: CallTracer>(
        self,
        ttm: &mut Ttm<O, I, Tr>,
        args: &[String],
    ) -> Result<String, RunError> {
        match self {
            Self::Ds => dict::builtin_ds(ttm, args),
            Self::Ap => dict::builtin_ap(ttm, args),
            Self::Cf => dict::builtin_cf(ttm, args),
            Self::Es => dict::builtin_es(ttm, args),
            Self::Cr => dict::builtin_cr(ttm, args),
            Self::Ss => dict::builtin_ss(ttm, args),
            Self::Sc => dict::builtin_sc(ttm, args),
            Self::Cc => scan::builtin_cc(ttm, args),
            Self::Cn => scan::builtin_cn(ttm, args),
            Self::Sn => scan::builtin_sn(ttm, args),
            Self::Cp => scan::builtin_cp(ttm, args),
            Self::Cs => scan::builtin_cs(ttm, args),
            Self::Scn => scan::builtin_scn(ttm, args),
            Self::Isc => scan::builtin_isc(ttm, args),
            Self::Rrp => scan::builtin_rrp(ttm, args),
            Self::Eos => scan::builtin_eos(ttm, args),
            Self::Gn => strutil::builtin_gn(ttm, args),
            Self::Zlc => strutil::builtin_zlc(ttm, args),
            Self::Zlcp => strutil::builtin_zlcp(ttm, args),
            Self::Flip => strutil::builtin_flip(ttm, args),
            Self::Norm => strutil::builtin_norm(ttm, args),
            Self::Dcl => class::builtin_dcl(ttm, args),
            Self::Dncl => class::builtin_dncl(ttm, args),
            Self::Ecl => class::builtin_ecl(ttm, args),
            Self::Ccl => class::builtin_ccl(ttm, args),
            Self::Scl => class::builtin_scl(ttm, args),
            Self::Tcl => class::builtin_tcl(ttm, args),
            Self::Ad => arith::builtin_ad(ttm, args),
            Self::Mu => arith::builtin_mu(ttm, args),
            Self::Su => arith::builtin_su(ttm, args),
            Self::Dv => arith::builtin_dv(ttm, args),
            Self::Dvr => arith::builtin_dvr(ttm, args),
            Self::Abs => arith::builtin_abs(ttm, args),
            Self::Eq => arith::builtin_eq(ttm, args),
            Self::Gt => arith::builtin_gt(ttm, args),
            Self::Lt => arith::builtin_lt(ttm, args),
            Self::EqP => arith::builtin_eq_logical(ttm, args),
            Self::GtP => arith::builtin_gt_logical(ttm, args),
            Self::LtP => arith::builtin_lt_logical(ttm, args),
            Self::Ps => io::builtin_ps(ttm, args),
            Self::Rs => io::builtin_rs(ttm, args),
            Self::Psr => io::builtin_psr(ttm, args),
            Self::Pf => io::builtin_pf(ttm, args),
            Self::Cm => io::builtin_cm(ttm, args),
            Self::Names => introspect::builtin_names(ttm, args),
            Self::Classes => introspect::builtin_classes(ttm, args),
            Self::Ndf => introspect::builtin_ndf(ttm, args),
            Self::Time => introspect::builtin_time(ttm, args),
            Self::Xtime => introspect::builtin_xtime(ttm, args),
            Self::Ctime => introspect::builtin_ctime(ttm, args),
            Self::Tf => introspect::builtin_tf(ttm, args),
            Self::Tn => introspect::builtin_tn(ttm, args),
            Self::Lf => introspect::builtin_lf(ttm, args),
            Self::Uf => introspect::builtin_uf(ttm, args),
            Self::Include => introspect::builtin_include(ttm, args),
            Self::Argv => introspect::builtin_argv(ttm, args),
            Self::Argc => introspect::builtin_argc(ttm, args),
            Self::Exit => introspect::builtin_exit(ttm, args),
            Self::Ttm => introspect::builtin_ttm(ttm, args),
        }
    }
}

const ALL_BUILTINS: &[Builtin] = &[
    Builtin::Ds,
    Builtin::Ap,
    Builtin::Cf,
    Builtin::Es,
    Builtin::Cr,
    Builtin::Ss,
    Builtin::Sc,
    Builtin::Cc,
    Builtin::Cn,
    Builtin::Sn,
    Builtin::Cp,
    Builtin::Cs,
    Builtin::Scn,
    Builtin::Isc,
    Builtin::Rrp,
    Builtin::Eos,
    Builtin::Gn,
    Builtin::Zlc,
    Builtin::Zlcp,
    Builtin::Flip,
    Builtin::Norm,
    Builtin::Dcl,
    Builtin::Dncl,
    Builtin::Ecl,
    Builtin::Ccl,
    Builtin::Scl,
    Builtin::Tcl,
    Builtin::Ad,
    Builtin::Mu,
    Builtin::Su,
    Builtin::Dv,
    Builtin::Dvr,
    Builtin::Abs,
    Builtin::Eq,
    Builtin::Gt,
    Builtin::Lt,
    Builtin::EqP,
    Builtin::GtP,
    Builtin::LtP,
    Builtin::Ps,
    Builtin::Rs,
    Builtin::Psr,
    Builtin::Pf,
    Builtin::Cm,
    Builtin::Names,
    Builtin::Classes,
    Builtin::Ndf,
    Builtin::Time,
    Builtin::Xtime,
    Builtin::Ctime,
    Builtin::Tf,
    Builtin::Tn,
    Builtin::Lf,
    Builtin::Uf,
    Builtin::Include,
    Builtin::Argv,
    Builtin::Argc,
    Builtin::Exit,
    Builtin::Ttm,
];

/// Registers every builtin into a fresh dictionary. Called once from
/// [`crate::Ttm::new`].
pub(crate) fn register_builtins(dict: &mut Dictionary) {
    for &b in ALL_BUILTINS {
        let name: &'static str = b.into();
        dict.insert(Name::new_builtin(name, b, b.minargs(), b.is_sideeffect()));
    }
}
