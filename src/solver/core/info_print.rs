use super::info::IPMInfo;
use super::traits::ProblemDims;
use super::CoreSettings;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use std::io::Write;
use std::time::Duration;

impl<T> ConfigurablePrintTarget for IPMInfo<T> {
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn print_to_sink(&mut self) {
        self.stream.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _exp_str_reformat(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

const RULE: &str = "-------------------------------------------------------------------------";

impl<T> IPMInfo<T>
where
    T: FloatT,
{
    pub(crate) fn print_banner(&mut self, settings: &CoreSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;
        writeln!(out, "{}", RULE)?;
        writeln!(
            out,
            "        pdipm v{}  -  primal-dual interior point solver",
            crate::VERSION
        )?;
        writeln!(out, "{}", RULE)?;
        Ok(())
    }

    pub(crate) fn print_configuration(
        &mut self,
        settings: &CoreSettings<T>,
        dims: &ProblemDims,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", dims.n)?;
        writeln!(out, "  inequalities  = {}", dims.m)?;
        writeln!(out, "  equalities    = {}", dims.p)?;
        writeln!(out,)?;

        self.print_settings(settings)?;

        Ok(())
    }

    pub(crate) fn print_status_header(&mut self, settings: &CoreSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        //print a subheader for the iterations info
        write!(out, "iter    ")?;
        write!(out, "pcost        ")?;
        write!(out, "pres      ")?;
        write!(out, "dres      ")?;
        write!(out, "gap       ")?;
        write!(out, " t        ")?;
        write!(out, "step      ")?;
        writeln!(out,)?;
        writeln!(out, "{}", RULE)?;
        out.flush()?;
        Ok(())
    }

    pub(crate) fn print_status(&mut self, settings: &CoreSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        write!(out, "{:>3}  ", self.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.gap))?;
        if self.t.is_finite() {
            write!(out, "{}  ", expformat!("{:6.2e}", self.t))?;
        } else {
            write!(out, " ------   ")?;
        }

        if self.iterations > 0 {
            write!(out, "{}  ", expformat!("{:>.2e}", self.step_length))?;
        } else {
            write!(out, " ------   ")?;
        }

        writeln!(out,)?;

        Ok(())
    }

    pub(crate) fn print_footer(&mut self, settings: &CoreSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let out = &mut self.stream;

        writeln!(out, "{}", RULE)?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        writeln!(
            out,
            "solve time = {:?}",
            Duration::from_secs_f64(self.solve_time)
        )?;
        out.flush()?;

        Ok(())
    }

    fn print_settings(&mut self, settings: &CoreSettings<T>) -> std::io::Result<()> {
        let out = &mut self.stream;
        let set = settings;

        writeln!(out, "settings:")?;
        writeln!(
            out,
            "  linear algebra: direct / dense ldl, precision: {} bit",
            _get_precision_string::<T>()
        )?;

        let time_lim_str = {
            if set.time_limit.is_infinite() {
                "Inf".to_string()
            } else {
                format!("{:?}", set.time_limit)
            }
        };
        writeln!(
            out,
            "  max iter = {}, time limit = {},  max step = {:.3}",
            set.max_iter, time_lim_str, set.max_step_fraction
        )?;

        writeln!(
            out,
            "  tol_feas = {:.1e}, tol_gap = {:.1e}, barrier mu = {:.1}",
            set.tol_feas, set.tol_gap, set.barrier_mu
        )?;

        writeln!(
            out,
            "  line search: alpha = {:.2}, backtrack = {:.2}, max iter = {}",
            set.linesearch_alpha, set.linesearch_backtrack_step, set.linesearch_max_iter
        )?;

        writeln!(
            out,
            "  static reg : {}, ϵ1 = {:.1e}, ϵ2 = {:.1e}",
            _bool_on_off(set.static_regularization_enable),
            set.static_regularization_constant,
            set.static_regularization_proportional,
        )?;

        writeln!(
            out,
            "  dynamic reg: {}, ϵ = {:.1e}, δ = {:.1e}",
            _bool_on_off(set.dynamic_regularization_enable),
            set.dynamic_regularization_eps,
            set.dynamic_regularization_delta
        )?;

        writeln!(
            out,
            "  iter refine: {}, reltol = {:.1e}, abstol = {:.1e},",
            _bool_on_off(set.iterative_refinement_enable),
            set.iterative_refinement_reltol,
            set.iterative_refinement_abstol
        )?;

        writeln!(
            out,
            "               max iter = {}, stop ratio = {:.1}",
            set.iterative_refinement_max_iter, set.iterative_refinement_stop_ratio
        )?;

        writeln!(out,)?;

        Ok(())
    }
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// convert a string in LowerExp display format into one that
// 1) always has a sign after the exponent, and
// 2) has at least two digits in the exponent.

fn _exp_str_reformat(mut thestr: String) -> String {
    let Some(eidx) = thestr.find('e') else {
        return thestr;
    };
    let has_sign = thestr[eidx + 1..].starts_with('-');

    let has_short_exp = {
        if !has_sign {
            thestr.len() == eidx + 2
        } else {
            thestr.len() == eidx + 3
        }
    };

    let chars = match (has_sign, has_short_exp) {
        (false, true) => "+0",
        (false, false) => "+",
        (true, true) => "0",
        (true, false) => "",
    };

    let shift = if has_sign { 2 } else { 1 };
    thestr.insert_str(eidx + shift, chars);
    thestr
}

#[test]
fn test_exp_str_reformat() {
    assert_eq!(_exp_str_reformat(format!("{:6.2e}", 1.5e-4)), "1.50e-04");
    assert_eq!(_exp_str_reformat(format!("{:+8.4e}", 12.0)), "+1.2000e+01");
    assert_eq!(_exp_str_reformat(format!("{:6.2e}", 3e120)), "3.00e+120");
    assert_eq!(_exp_str_reformat(format!("{:.2e}", 2.5e-11)), "2.50e-11");
}
